//! The read loop.
//!
//! Runs on a dedicated thread for the lifetime of a session. It is the only
//! code that reads the socket or touches the [`FrameDecoder`].

use std::{
    io::{self, Read},
    net::{Shutdown, TcpStream},
    sync::Arc,
};

use chrono::Local;
use parley_proto::{FrameDecoder, ProtocolError};

use crate::{
    ChatMessage, ConnectionState, Dispatcher, Event, EventSender, ReadFailure,
    state::SharedState,
};

/// Reader-thread state. Consumed by [`ReadLoop::run`].
pub(crate) struct ReadLoop {
    pub(crate) stream: TcpStream,
    pub(crate) decoder: FrameDecoder,
    pub(crate) dispatcher: Dispatcher,
    pub(crate) events: EventSender,
    pub(crate) shared: Arc<SharedState>,
    pub(crate) buffer_size: usize,
}

impl ReadLoop {
    /// Receive until the peer closes, the transport fails, or the session
    /// is closed.
    pub(crate) fn run(mut self) {
        let mut buf = vec![0u8; self.buffer_size.max(1)];

        let failure = loop {
            if !self.shared.is_running() {
                tracing::debug!("read loop observed close");
                return;
            }

            match self.stream.read(&mut buf) {
                Ok(0) => break ReadFailure::PeerClosed,
                Ok(n) => {
                    if let Err(e) = self.dispatch(&buf[..n]) {
                        break ReadFailure::Protocol(e);
                    }
                },
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {},
                Err(e) => break ReadFailure::Transport(e),
            }
        };

        self.finish(&failure);
    }

    /// Decode, classify and enqueue every frame completed by `bytes`.
    fn dispatch(&mut self, bytes: &[u8]) -> Result<(), ProtocolError> {
        self.decoder.extend(bytes);

        while let Some(raw) = self.decoder.next_frame()? {
            match self.dispatcher.classify(&raw) {
                Some(event) => {
                    if !self.events.push(event) {
                        tracing::debug!("event queue dropped, discarding frame");
                    }
                },
                None => tracing::debug!(len = raw.len(), "ignoring unclassified frame"),
            }
        }

        Ok(())
    }

    /// Report the failure unless `close()` already owns the shutdown.
    fn finish(self, failure: &ReadFailure) {
        if !self.shared.stop() {
            tracing::debug!(reason = %failure, "read loop stopped by close");
            return;
        }

        tracing::warn!(error = %failure, "connection lost");

        // Enqueue before publishing the state: a consumer that sees the
        // terminal state and then drains is guaranteed to get this notice.
        let notice = Event::Chat(ChatMessage::system(failure.to_string(), Local::now()));
        self.events.push(notice);

        if matches!(failure, ReadFailure::Protocol(_))
            && let Err(e) = self.stream.shutdown(Shutdown::Both)
        {
            tracing::debug!(error = %e, "shutdown after protocol error");
        }

        self.shared.transition(ConnectionState::Connected, failure.resulting_state());
    }
}
