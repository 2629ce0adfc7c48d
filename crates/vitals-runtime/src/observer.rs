//! Fan-out of engine output to real-time channel subscribers.

use tokio::sync::broadcast;

use vitals_core::models::Event;

use crate::protocol::ServerMessage;

/// Broadcast hub. Slow subscribers lag and drop messages rather than
/// blocking event processing.
#[derive(Debug, Clone)]
pub struct ObserverHub {
    tx: broadcast::Sender<ServerMessage>,
}

/// A new subscriber: the `initial-events` backfill plus the live feed.
#[derive(Debug)]
pub struct Subscription {
    pub backfill: ServerMessage,
    pub receiver: broadcast::Receiver<ServerMessage>,
}

impl ObserverHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Send to every current subscriber. No subscribers is not an error.
    pub fn publish(&self, message: ServerMessage) {
        let _ = self.tx.send(message);
    }

    pub fn subscribe(&self, recent: Vec<Event>) -> Subscription {
        Subscription {
            backfill: ServerMessage::InitialEvents { events: recent },
            receiver: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
