//! Reader-to-consumer hand-off.
//!
//! An unbounded FIFO channel. The reader thread pushes without blocking; the
//! consumer drains whatever is queued without blocking. With one producer,
//! the consumer sees events in decode order.

use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::Event;

/// Create a connected sender/queue pair.
pub fn event_queue() -> (EventSender, EventQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, EventQueue { rx })
}

/// Producer half, held by the reader thread.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<Event>,
}

impl EventSender {
    /// Enqueue an event. Never blocks.
    ///
    /// Returns `false` if the queue has been dropped; the event is discarded.
    pub fn push(&self, event: Event) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Consumer half, owned by the session.
#[derive(Debug)]
pub struct EventQueue {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventQueue {
    /// Take every queued event in insertion order. Never blocks.
    pub fn drain_all(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        events
    }

    /// True once every sender is gone and nothing is left to drain.
    pub fn is_closed(&self) -> bool {
        self.rx.is_closed() && self.rx.is_empty()
    }
}
