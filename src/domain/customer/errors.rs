// ============================================================================
// Customer Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CustomerError {
    #[error("Id is required")]
    EmptyId,

    #[error("Name is required")]
    EmptyName,

    #[error("Address is mandatory to activate a customer")]
    AddressRequired,

    #[error("Invalid address: {0}")]
    InvalidAddress(&'static str),

    #[error("Reward points must be finite and non-negative: {0}")]
    InvalidRewardPoints(f64),
}
