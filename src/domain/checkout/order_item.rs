use serde::{Deserialize, Serialize};

use super::errors::OrderError;

/// One line of an order; `price` is the unit price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    id: String,
    name: String,
    price: f64,
    product_id: String,
    quantity: i32,
}

impl OrderItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        product_id: impl Into<String>,
        quantity: i32,
    ) -> Result<Self, OrderError> {
        let item = Self {
            id: id.into(),
            name: name.into(),
            price,
            product_id: product_id.into(),
            quantity,
        };
        item.validate()?;
        Ok(item)
    }

    fn validate(&self) -> Result<(), OrderError> {
        if self.id.trim().is_empty() {
            return Err(OrderError::EmptyId);
        }
        if self.product_id.trim().is_empty() {
            return Err(OrderError::EmptyProductId);
        }
        if self.quantity <= 0 {
            return Err(OrderError::InvalidQuantity(self.quantity));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(OrderError::InvalidPrice(self.price));
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
