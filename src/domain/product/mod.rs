// ============================================================================
// Product Domain
// ============================================================================

pub mod commands;
pub mod entity;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod service;
pub mod command_handler;

pub use commands::*;
pub use entity::*;
pub use errors::*;
pub use events::*;
pub use handlers::*;
pub use service::*;
pub use command_handler::*;
