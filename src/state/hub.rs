//! Broadcast hub fanning events out to every connected display socket.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::warn;

/// Fan-out hub backed by a Tokio broadcast channel.
///
/// Events are serialized once at publish time and delivered to subscribers as
/// JSON text frames. Delivery is best effort: a publish with no subscribers or
/// a lagging subscriber never fails the operation that triggered it.
pub struct EventHub {
    sender: broadcast::Sender<String>,
}

impl EventHub {
    /// Construct a hub with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a subscriber that receives subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    /// Serialize and broadcast an event, ignoring delivery errors.
    pub fn publish<T: Serialize>(&self, event: &T) {
        match serde_json::to_string(event) {
            Ok(payload) => {
                let _ = self.sender.send(payload);
            }
            Err(err) => warn!(error = %err, "failed to serialize broadcast event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Ping {
        seq: u32,
    }

    #[tokio::test]
    async fn publish_reaches_subscribers_as_json() {
        let hub = EventHub::new(4);
        let mut rx = hub.subscribe();
        hub.publish(&Ping { seq: 7 });
        assert_eq!(rx.recv().await.unwrap(), r#"{"seq":7}"#);
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let hub = EventHub::new(4);
        hub.publish(&Ping { seq: 1 });
    }
}
