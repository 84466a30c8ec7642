// ============================================================================
// In-Memory Repositories
// ============================================================================
//
// Entities are mapped to row models on write and rebuilt (re-validated) on
// read, so nothing stored can be mutated through a returned entity.
//
// ============================================================================

mod customer;
mod order;
mod product;

pub use customer::InMemoryCustomerRepository;
pub use order::InMemoryOrderRepository;
pub use product::InMemoryProductRepository;
