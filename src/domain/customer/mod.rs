// ============================================================================
// Customer Domain
// ============================================================================
//
// This module contains ALL Customer-specific code:
// - Value objects (Address)
// - Entity (Customer with its business rules)
// - Events (CustomerCreated, CustomerAddressChanged)
// - Event handlers (email / queue side effects)
// - Commands and the command handler that raises the events
//
// ============================================================================

pub mod value_objects;
pub mod entity;
pub mod events;
pub mod handlers;
pub mod commands;
pub mod errors;
pub mod command_handler;

// Re-export for convenience
pub use value_objects::*;
pub use entity::*;
pub use events::*;
pub use handlers::*;
pub use commands::*;
pub use errors::*;
pub use command_handler::*;
