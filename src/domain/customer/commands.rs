use super::value_objects::Address;

// ============================================================================
// Customer Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone)]
pub enum CustomerCommand {
    CreateCustomer {
        customer_id: String,
        name: String,
        address: Option<Address>,
    },
    ChangeAddress {
        customer_id: String,
        address: Address,
    },
    ActivateCustomer {
        customer_id: String,
    },
    DeactivateCustomer {
        customer_id: String,
    },
}
