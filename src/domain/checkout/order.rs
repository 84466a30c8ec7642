use super::errors::OrderError;
use super::order_item::OrderItem;

// ============================================================================
// Order Entity
// ============================================================================
//
// Invariants:
// - id and customer_id are never empty
// - an order always has at least one item
//
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: String,
    customer_id: String,
    items: Vec<OrderItem>,
}

impl Order {
    pub fn new(
        id: impl Into<String>,
        customer_id: impl Into<String>,
        items: Vec<OrderItem>,
    ) -> Result<Self, OrderError> {
        let order = Self {
            id: id.into(),
            customer_id: customer_id.into(),
            items,
        };
        order.validate()?;
        Ok(order)
    }

    fn validate(&self) -> Result<(), OrderError> {
        if self.id.trim().is_empty() {
            return Err(OrderError::EmptyId);
        }
        if self.customer_id.trim().is_empty() {
            return Err(OrderError::EmptyCustomerId);
        }
        Self::validate_items(&self.items)
    }

    fn validate_items(items: &[OrderItem]) -> Result<(), OrderError> {
        if items.is_empty() {
            return Err(OrderError::EmptyItems);
        }
        if let Some(item) = items.iter().find(|item| item.quantity() <= 0) {
            return Err(OrderError::InvalidQuantity(item.quantity()));
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(OrderItem::total).sum()
    }

    pub fn add_item(&mut self, item: OrderItem) {
        self.items.push(item);
    }

    pub fn replace_items(&mut self, items: Vec<OrderItem>) -> Result<(), OrderError> {
        Self::validate_items(&items)?;
        self.items = items;
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
