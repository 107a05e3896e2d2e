//! Core traits shared by the domain and service layers.

use crate::CardpackResult;
use async_trait::async_trait;
use shaku::Interface;

/// Trait for domain events.
///
/// Domain events represent something significant that happened
/// in the domain and are handed to an [`EventPublisher`].
pub trait DomainEvent: Send + Sync {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Returns the aggregate ID that this event belongs to.
    fn aggregate_id(&self) -> String;

    /// Returns the event timestamp.
    fn timestamp(&self) -> chrono::DateTime<chrono::Utc>;

    /// Serializes the event to JSON.
    fn to_json(&self) -> CardpackResult<String>;
}

/// Trait for entities with a unique identifier.
pub trait Entity<ID> {
    /// Returns the entity's unique identifier.
    fn id(&self) -> &ID;
}

/// Trait for aggregate roots.
///
/// An aggregate root buffers the events raised while it was built;
/// whoever persists the aggregate drains them afterwards.
pub trait AggregateRoot<ID>: Entity<ID> {
    /// Event type raised by this aggregate.
    type Event: DomainEvent;

    /// Returns the events raised but not yet drained.
    fn pending_events(&self) -> &[Self::Event];

    /// Drains the pending events, in the order they were raised.
    fn take_pending_events(&mut self) -> Vec<Self::Event>;
}

/// Trait for event publishers.
///
/// Publishing is best-effort: implementations should swallow transport
/// unavailability and only report failures they cannot classify.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait EventPublisher: Interface + Send + Sync {
    /// Publishes a domain event.
    async fn publish(&self, event: Box<dyn DomainEvent>) -> CardpackResult<()>;

    /// Publishes multiple domain events in order.
    async fn publish_all(&self, events: Vec<Box<dyn DomainEvent>>) -> CardpackResult<()>;
}
