//! Session: one TCP connection to a chat server.
//!
//! [`Session::connect`] validates input, connects with a bounded timeout,
//! sends the nickname handshake and starts the reader thread. The consumer
//! then calls [`Session::poll`] on its own schedule and [`Session::send`]
//! for outbound lines. [`Session::close`] (or dropping the session) shuts
//! the socket down and joins the reader.

use std::{
    io::{self, Write},
    net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs},
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use parley_proto::{
    DEFAULT_MAX_FRAME_SIZE, Frame, FrameDecoder, contains_delimiter, encode_handshake,
};

use crate::{
    ConnectError, ConnectionState, Dispatcher, Event, EventQueue, SendError, event_queue,
    reader::ReadLoop, state::SharedState,
};

/// Time allowed for the TCP connect to each resolved address.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Size of a single socket read.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Connect timeout per address. Must be non-zero.
    pub connect_timeout: Duration,
    /// Bytes requested per socket read
    pub read_buffer_size: usize,
    /// Cap on buffered, undelimited input
    pub max_frame_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

impl SessionConfig {
    /// Short timeouts for local servers and tests.
    pub fn development() -> Self {
        Self { connect_timeout: Duration::from_millis(500), ..Self::default() }
    }
}

/// Parse and validate port text.
///
/// # Errors
///
/// - `ConnectError::InvalidPort` for non-numeric text, zero, or values
///   above 65535
pub fn parse_port(input: &str) -> Result<u16, ConnectError> {
    match input.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConnectError::InvalidPort { input: input.to_string() }),
    }
}

/// A live connection and its reader thread.
///
/// # Invariants
///
/// - `send` succeeds only while [`ConnectionState::Connected`].
/// - Only the reader thread reads the socket.
/// - After `close` returns the reader thread has exited and the state is
///   [`ConnectionState::Disconnected`].
#[derive(Debug)]
pub struct Session {
    nickname: String,
    host: String,
    port: u16,
    peer_addr: SocketAddr,
    /// Write half. The reader owns a clone of the same socket.
    stream: TcpStream,
    shared: Arc<SharedState>,
    events: EventQueue,
    reader: Option<JoinHandle<()>>,
}

impl Session {
    /// Connect to `host:port` and announce `nickname`.
    ///
    /// Single attempt: addresses are tried in resolver order and the first
    /// to accept wins. No retries beyond that.
    ///
    /// # Errors
    ///
    /// - `ConnectError::InvalidPort` before any I/O
    /// - `ConnectError::Resolve` / `ConnectError::NoAddress` on lookup
    ///   failure
    /// - `ConnectError::Connect` if every address refuses or times out
    /// - `ConnectError::Handshake` if the nickname cannot be written
    /// - `ConnectError::Spawn` if the reader thread cannot start
    pub fn connect(
        host: &str,
        port: &str,
        nickname: &str,
        config: &SessionConfig,
    ) -> Result<Self, ConnectError> {
        let port = parse_port(port)?;
        let shared = Arc::new(SharedState::new(ConnectionState::Connecting));

        tracing::debug!(host, port, "resolving");
        let addrs: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|source| ConnectError::Resolve { host: host.to_string(), source })?
            .collect();

        let (stream, peer_addr) = connect_any(host, &addrs, config.connect_timeout)?;

        (&stream).write_all(&encode_handshake(nickname)).map_err(ConnectError::Handshake)?;

        let reader_stream = stream.try_clone().map_err(ConnectError::Spawn)?;
        let (sender, events) = event_queue();
        shared.set(ConnectionState::Connected);

        let read_loop = ReadLoop {
            stream: reader_stream,
            decoder: FrameDecoder::with_max_frame_size(config.max_frame_size),
            dispatcher: Dispatcher::new(nickname),
            events: sender,
            shared: Arc::clone(&shared),
            buffer_size: config.read_buffer_size,
        };

        let reader = thread::Builder::new()
            .name(format!("parley-reader-{peer_addr}"))
            .spawn(move || read_loop.run())
            .map_err(ConnectError::Spawn)?;

        tracing::info!(%peer_addr, nickname, "connected");

        Ok(Self {
            nickname: nickname.to_string(),
            host: host.to_string(),
            port,
            peer_addr,
            stream,
            shared,
            events,
            reader: Some(reader),
        })
    }

    /// Send one chat line as `MSG:<text>\nEND\n`.
    ///
    /// Writes synchronously on the caller's thread.
    ///
    /// # Errors
    ///
    /// - `SendError::NotConnected` outside [`ConnectionState::Connected`]
    /// - `SendError::Write` if the socket write fails. The session moves to
    ///   [`ConnectionState::Failed`] and rejects later sends.
    pub fn send(&self, text: &str) -> Result<(), SendError> {
        let state = self.shared.get();
        if !state.can_send() {
            return Err(SendError::NotConnected { state });
        }

        if contains_delimiter(text) {
            tracing::warn!("outgoing message contains the frame delimiter and will be split");
        }

        let bytes = Frame::Message(text.to_string()).to_bytes();
        if let Err(e) = (&self.stream).write_all(&bytes) {
            tracing::warn!(error = %e, peer = %self.peer_addr, "send failed");
            // The send error is the report; keep the reader quiet.
            self.shared.stop();
            self.shared.transition(ConnectionState::Connected, ConnectionState::Failed);
            self.shutdown_socket();
            return Err(SendError::Write(e));
        }

        tracing::trace!(len = bytes.len(), "sent message");
        Ok(())
    }

    /// Take every event received since the last call. Never blocks.
    pub fn poll(&mut self) -> Vec<Event> {
        self.events.drain_all()
    }

    /// Current connection state.
    pub fn current_state(&self) -> ConnectionState {
        self.shared.get()
    }

    /// Close the connection. Idempotent.
    ///
    /// Safe while the reader is blocked in a receive: the shutdown wakes it
    /// and it exits without reporting an error.
    pub fn close(&mut self) {
        let was_running = self.shared.stop();

        if self.reader.is_none() && self.shared.get() == ConnectionState::Disconnected {
            return;
        }

        self.shared.set(ConnectionState::Closing);
        self.shutdown_socket();

        if let Some(reader) = self.reader.take()
            && reader.join().is_err()
        {
            tracing::error!(peer = %self.peer_addr, "read loop panicked");
        }

        self.shared.set(ConnectionState::Disconnected);

        if was_running {
            tracing::info!(peer = %self.peer_addr, "session closed");
        }
    }

    /// Local nickname sent in the handshake.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Host as given to `connect`.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Validated port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Address that accepted the connection.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    fn shutdown_socket(&self) {
        if let Err(e) = self.stream.shutdown(Shutdown::Both)
            && e.kind() != io::ErrorKind::NotConnected
        {
            tracing::debug!(error = %e, "socket shutdown");
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

/// Try each address in order; return the first connected stream.
fn connect_any(
    host: &str,
    addrs: &[SocketAddr],
    timeout: Duration,
) -> Result<(TcpStream, SocketAddr), ConnectError> {
    let mut last_error = None;

    for addr in addrs {
        match TcpStream::connect_timeout(addr, timeout) {
            Ok(stream) => return Ok((stream, *addr)),
            Err(e) => {
                tracing::debug!(%addr, error = %e, "connect attempt failed");
                last_error = Some((*addr, e));
            },
        }
    }

    match last_error {
        Some((addr, source)) => Err(ConnectError::Connect { addr: addr.to_string(), source }),
        None => Err(ConnectError::NoAddress { host: host.to_string() }),
    }
}
