use serde::{Deserialize, Serialize};

use crate::event_dispatch::DomainEvent;
use super::value_objects::Address;

// ============================================================================
// Customer Domain Events
// ============================================================================

/// Customer Created - raised once the new customer is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCreated {
    pub id: String,
    pub name: String,
    pub address: Option<Address>,
}

impl DomainEvent for CustomerCreated {
    fn event_type() -> &'static str { "CustomerCreatedEvent" }
}

/// Customer Address Changed - raised after the new address is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAddressChanged {
    pub id: String,
    pub name: String,
    pub address: Address,
}

impl DomainEvent for CustomerAddressChanged {
    fn event_type() -> &'static str { "CustomerChangedAddressEvent" }
}
