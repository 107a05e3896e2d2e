//! Publisher that writes events to the structured log.

use async_trait::async_trait;
use cardpack_core::{CardpackResult, DomainEvent, EventPublisher};
use shaku::Component;
use tracing::info;

/// Emits every event as an `info` record on the `cardpack::events` target.
#[derive(Component, Debug, Default)]
#[shaku(interface = EventPublisher)]
pub struct TracingEventPublisher {}

impl TracingEventPublisher {
    /// Creates a new tracing publisher.
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> CardpackResult<()> {
        let payload = event.to_json()?;
        info!(
            target: "cardpack::events",
            event_type = event.event_type(),
            aggregate_id = %event.aggregate_id(),
            occurred_at = %event.timestamp(),
            payload = %payload,
            "Domain event"
        );
        Ok(())
    }

    async fn publish_all(&self, events: Vec<Box<dyn DomainEvent>>) -> CardpackResult<()> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
