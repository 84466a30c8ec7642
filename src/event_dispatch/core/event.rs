use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt::Debug;
use anyhow::Result;

// ============================================================================
// Event Envelope - Domain Event Instance
// ============================================================================
//
// Wraps a domain event payload with the moment it occurred and a little
// metadata. The payload type doubles as the event type identifier used by
// the dispatcher registry.
//
// ============================================================================

/// Immutable event instance handed to every subscribed handler
///
/// Type Parameter:
/// - `E`: The payload type (must implement DomainEvent trait)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EventEnvelope<E> {
    // Event Identity
    pub event_id: Uuid,

    // Event Type Information
    pub event_type: String,
    pub event_version: i32,

    // Event Payload
    pub event_data: E,

    // Timing
    pub occurred_at: DateTime<Utc>,

    // Groups events raised by the same use case
    pub correlation_id: Option<Uuid>,

    pub metadata: HashMap<String, String>,
}

impl<E: DomainEvent> EventEnvelope<E> {
    pub fn new(event_data: E) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: E::event_type().to_string(),
            event_version: E::event_version(),
            event_data,
            correlation_id: None,
            occurred_at: Utc::now(),
            metadata: HashMap::new(),
        }
    }
}

impl<E> EventEnvelope<E> {
    pub fn with_correlation(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn event_data(&self) -> &E {
        &self.event_data
    }
}

// ============================================================================
// Domain Event Trait
// ============================================================================

/// Payload contract for everything that can be dispatched.
///
/// `event_type` is the stable name of the event kind; the Rust type itself is
/// the registry key, so two payload types never collide even if they share a
/// name.
pub trait DomainEvent:
    Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static
{
    fn event_type() -> &'static str where Self: Sized;
    fn event_version() -> i32 where Self: Sized { 1 }
}

// ============================================================================
// Event Serialization Helpers
// ============================================================================

pub fn serialize_event<E: Serialize>(event: &E) -> Result<String> {
    Ok(serde_json::to_string(event)?)
}

pub fn deserialize_event<E: DeserializeOwned>(json: &str) -> Result<E> {
    Ok(serde_json::from_str(json)?)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
    struct TestEvent {
        data: String,
    }

    impl DomainEvent for TestEvent {
        fn event_type() -> &'static str { "TestEvent" }
    }

    #[derive(Serialize, Deserialize, Clone, Debug)]
    struct VersionedEvent;

    impl DomainEvent for VersionedEvent {
        fn event_type() -> &'static str { "VersionedEvent" }
        fn event_version() -> i32 { 3 }
    }

    #[test]
    fn test_event_envelope_creation() {
        let before = Utc::now();
        let envelope = EventEnvelope::new(TestEvent {
            data: "test".to_string(),
        });

        assert_eq!(envelope.event_type, "TestEvent");
        assert_eq!(envelope.event_version, 1);
        assert_eq!(envelope.event_data().data, "test");
        assert!(envelope.occurred_at() >= before);
        assert!(envelope.correlation_id.is_none());
        assert!(envelope.metadata.is_empty());
    }

    #[test]
    fn test_event_envelope_builders() {
        let correlation_id = Uuid::new_v4();
        let envelope = EventEnvelope::new(VersionedEvent)
            .with_correlation(correlation_id)
            .with_metadata("source", "unit-test");

        assert_eq!(envelope.event_version, 3);
        assert_eq!(envelope.correlation_id, Some(correlation_id));
        assert_eq!(envelope.metadata.get("source").map(String::as_str), Some("unit-test"));
    }

    #[test]
    fn test_event_serialization() {
        let envelope = EventEnvelope::new(TestEvent {
            data: "test data".to_string(),
        });

        let json = serialize_event(&envelope).unwrap();
        let deserialized: EventEnvelope<TestEvent> = deserialize_event(&json).unwrap();

        assert_eq!(deserialized.event_id, envelope.event_id);
        assert_eq!(deserialized.event_data, envelope.event_data);
        assert_eq!(deserialized.occurred_at, envelope.occurred_at);
    }
}
