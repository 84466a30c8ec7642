// ============================================================================
// Event Dispatch Infrastructure
// ============================================================================
//
// Generic, in-process domain event dispatching.
// Domain-specific events and handlers live in src/domain/
//
// ============================================================================

pub mod core;
mod dispatcher;
mod error;

pub use self::core::*;
pub use dispatcher::EventDispatcher;
pub use error::{DispatchError, HandlerFailure};
