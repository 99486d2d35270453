//! Single-process fan-out for per-user private channels.
//!
//! Delivery to live subscribers is at-most-once per publish: events go out
//! over bounded broadcast channels with no retry or queueing. Durability for
//! offline sessions comes from the persisted notification record, not from
//! this broker.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

/// One event on a private channel: a name plus a JSON payload
#[derive(Debug, Clone, Serialize)]
pub struct ChannelEvent {
    pub event: String,
    pub payload: serde_json::Value,
}

/// Per-user broadcast hub. Senders are created lazily on first subscribe or
/// publish and kept for the life of the process.
pub struct Broker {
    channels: Arc<RwLock<HashMap<Uuid, broadcast::Sender<ChannelEvent>>>>,
    capacity: usize,
}

impl Broker {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// Subscribe to a user's private channel. Channel authorization happens
    /// at the transport boundary before this is called.
    pub async fn subscribe(&self, user_id: Uuid) -> broadcast::Receiver<ChannelEvent> {
        self.sender(user_id).await.subscribe()
    }

    /// Publish an event to every live subscriber of the user's channel.
    /// Returns the number of subscribers reached; zero is not an error.
    pub async fn publish(&self, user_id: Uuid, event: ChannelEvent) -> usize {
        let sender = self.sender(user_id).await;
        match sender.send(event) {
            Ok(receivers) => receivers,
            // Send only fails when nobody is subscribed
            Err(_) => 0,
        }
    }

    async fn sender(&self, user_id: Uuid) -> broadcast::Sender<ChannelEvent> {
        // Fast path: channel already exists
        {
            let channels = self.channels.read().await;
            if let Some(sender) = channels.get(&user_id) {
                return sender.clone();
            }
        }

        let mut channels = self.channels.write().await;
        channels
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn publish_reaches_only_that_users_subscribers() {
        let broker = Broker::new(8);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mut alice_rx = broker.subscribe(alice).await;
        let mut bob_rx = broker.subscribe(bob).await;

        let reached = broker
            .publish(
                alice,
                ChannelEvent {
                    event: "task.created".to_string(),
                    payload: json!({"for": "alice"}),
                },
            )
            .await;
        assert_eq!(reached, 1);

        let received = alice_rx.recv().await.unwrap();
        assert_eq!(received.event, "task.created");
        assert_eq!(received.payload["for"], "alice");

        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_lost_not_an_error() {
        let broker = Broker::new(8);
        let reached = broker
            .publish(
                Uuid::new_v4(),
                ChannelEvent {
                    event: "task.created".to_string(),
                    payload: json!({}),
                },
            )
            .await;
        assert_eq!(reached, 0);
    }

    #[tokio::test]
    async fn fan_out_reaches_every_session_of_the_user() {
        let broker = Broker::new(8);
        let user = Uuid::new_v4();

        let mut rx1 = broker.subscribe(user).await;
        let mut rx2 = broker.subscribe(user).await;

        let reached = broker
            .publish(
                user,
                ChannelEvent {
                    event: "task.created".to_string(),
                    payload: json!({"n": 1}),
                },
            )
            .await;
        assert_eq!(reached, 2);
        assert_eq!(rx1.recv().await.unwrap().payload["n"], 1);
        assert_eq!(rx2.recv().await.unwrap().payload["n"], 1);
    }
}
