// ============================================================================
// Checkout Domain
// ============================================================================
//
// Orders and their items. Orders raise no domain events; the reward points
// they earn are credited to the customer through OrderService.
//
// ============================================================================

pub mod errors;
pub mod order_item;
pub mod order;
pub mod service;

pub use errors::*;
pub use order_item::*;
pub use order::*;
pub use service::*;
