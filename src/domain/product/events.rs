use serde::{Deserialize, Serialize};

use crate::event_dispatch::DomainEvent;

/// Product Created - raised once the new product is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl DomainEvent for ProductCreated {
    fn event_type() -> &'static str { "ProductCreatedEvent" }
}
