pub mod config;
pub mod domain;
pub mod event_dispatch;
pub mod infrastructure;

pub use config::AppConfig;
pub use event_dispatch::{
    DispatchError, DomainEvent, EventDispatcher, EventEnvelope, EventHandler, FnHandler,
    HandlerError, HandlerFailure,
};
