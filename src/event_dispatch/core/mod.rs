// ============================================================================
// Event Dispatch Core - Event and Handler Contracts
// ============================================================================
//
// What the dispatcher needs from the outside world:
// - Events: a payload type with a stable name, wrapped in an envelope
//   carrying the time it occurred
// - Handlers: a single synchronous `handle(event)` operation
//
// ============================================================================

pub mod event;
pub mod handler;

pub use event::{DomainEvent, EventEnvelope, serialize_event, deserialize_event};
pub use handler::{EventHandler, FnHandler, HandlerError};
