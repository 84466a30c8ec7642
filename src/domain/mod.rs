// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each bounded context has its own subdirectory with entities, value
// objects, errors and, where something worth announcing happens, events and
// the handlers reacting to them.
//
// This layer only knows the dispatcher contracts in src/event_dispatch/.
//
// ============================================================================

pub mod shared;
pub mod customer;
pub mod product;
pub mod checkout;
