use std::fmt;

use super::event::{DomainEvent, EventEnvelope};

// ============================================================================
// Event Handler - Side Effect Triggered by a Domain Event
// ============================================================================
//
// Handlers run synchronously on the notifying thread. A handler that needs
// async work must block on it or hand it off itself; the dispatcher moves on
// as soon as `handle` returns.
//
// ============================================================================

/// Failure reported by a single handler invocation
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Handler rejected event: {0}")]
    Rejected(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Single-operation capability subscribed to events of type `E`
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    fn handle(&self, event: &EventEnvelope<E>) -> Result<(), HandlerError>;

    /// Name used in logs and failure reports
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Adapts a closure into an [`EventHandler`]
pub struct FnHandler<F> {
    name: String,
    f: F,
}

impl<F> FnHandler<F> {
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").field("name", &self.name).finish()
    }
}

impl<E, F> EventHandler<E> for FnHandler<F>
where
    E: DomainEvent,
    F: Fn(&EventEnvelope<E>) -> Result<(), HandlerError> + Send + Sync,
{
    fn handle(&self, event: &EventEnvelope<E>) -> Result<(), HandlerError> {
        (self.f)(event)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
