// ============================================================================
// Checkout Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Id is required")]
    EmptyId,

    #[error("CustomerId is required")]
    EmptyCustomerId,

    #[error("ProductId is required")]
    EmptyProductId,

    #[error("Items are required")]
    EmptyItems,

    #[error("Quantity must be greater than 0: {0}")]
    InvalidQuantity(i32),

    #[error("Price must be a non-negative number: {0}")]
    InvalidPrice(f64),
}
