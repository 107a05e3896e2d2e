//! In-process fan-out publisher over a tokio broadcast channel.

use async_trait::async_trait;
use cardpack_core::{CardpackResult, DomainEvent, EventPublisher};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shaku::Component;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Default channel capacity.
pub const DEFAULT_BROADCAST_CAPACITY: usize = 256;

/// Serialized form of a domain event as seen by subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_type: String,
    pub aggregate_id: String,
    pub occurred_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    /// Builds an envelope from a domain event.
    pub fn from_event(event: &dyn DomainEvent) -> CardpackResult<Self> {
        Ok(Self {
            event_type: event.event_type().to_string(),
            aggregate_id: event.aggregate_id(),
            occurred_at: event.timestamp(),
            payload: serde_json::from_str(&event.to_json()?)?,
        })
    }
}

/// Publishes events to every live subscriber.
///
/// Slow subscribers lag and lose the oldest envelopes; the publisher
/// never waits on them.
#[derive(Component)]
#[shaku(interface = EventPublisher)]
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<EventEnvelope>,
}

impl BroadcastEventPublisher {
    /// Creates a publisher with its own channel.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Creates a publisher over an existing channel.
    #[must_use]
    pub fn with_sender(sender: broadcast::Sender<EventEnvelope>) -> Self {
        Self { sender }
    }

    /// Builds the DI parameters around a shared sender.
    #[must_use]
    pub fn parameters(
        sender: broadcast::Sender<EventEnvelope>,
    ) -> BroadcastEventPublisherParameters {
        BroadcastEventPublisherParameters { sender }
    }

    /// Subscribes to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// Current number of subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEventPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_BROADCAST_CAPACITY)
    }
}

impl std::fmt::Debug for BroadcastEventPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastEventPublisher")
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

#[async_trait]
impl EventPublisher for BroadcastEventPublisher {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> CardpackResult<()> {
        let envelope = EventEnvelope::from_event(event.as_ref())?;
        let event_type = envelope.event_type.clone();

        match self.sender.send(envelope) {
            Ok(receivers) => debug!(%event_type, receivers, "Event broadcast"),
            Err(_) => warn!(%event_type, "No subscribers, event dropped"),
        }
        Ok(())
    }

    async fn publish_all(&self, events: Vec<Box<dyn DomainEvent>>) -> CardpackResult<()> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardpack_core::{CardId, DrawLogId, PackId};
    use cardpack_domain::DrawCompleted;

    fn event(log_id: DrawLogId) -> Box<dyn DomainEvent> {
        Box::new(DrawCompleted::new(
            log_id,
            PackId::parse("starter").unwrap(),
            vec![CardId::new(4).unwrap(), CardId::new(4).unwrap()],
            Utc::now(),
        ))
    }

    #[tokio::test]
    async fn test_subscriber_receives_envelope() {
        let publisher = BroadcastEventPublisher::new(8);
        let mut rx = publisher.subscribe();
        let log_id = DrawLogId::new();

        publisher.publish(event(log_id)).await.unwrap();

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.event_type, "draw.completed");
        assert_eq!(envelope.aggregate_id, log_id.to_string());
        assert_eq!(envelope.payload["card_ids"], serde_json::json!([4, 4]));
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let publisher = BroadcastEventPublisher::default();
        assert_eq!(publisher.subscriber_count(), 0);
        assert!(publisher.publish(event(DrawLogId::new())).await.is_ok());
    }

    #[tokio::test]
    async fn test_publish_all_keeps_order() {
        let publisher = BroadcastEventPublisher::new(8);
        let mut rx = publisher.subscribe();
        let first = DrawLogId::new();
        let second = DrawLogId::new();

        publisher
            .publish_all(vec![event(first), event(second)])
            .await
            .unwrap();

        assert_eq!(rx.recv().await.unwrap().aggregate_id, first.to_string());
        assert_eq!(rx.recv().await.unwrap().aggregate_id, second.to_string());
    }
}
