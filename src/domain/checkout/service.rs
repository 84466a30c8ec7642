use uuid::Uuid;

use crate::domain::customer::{Customer, CustomerError};
use super::errors::OrderError;
use super::order::Order;
use super::order_item::OrderItem;

// ============================================================================
// Order Domain Service
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PlaceOrderError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Customer(#[from] CustomerError),
}

pub struct OrderService;

impl OrderService {
    /// Create an order for `customer` and credit half its total as reward points
    pub fn place_order(customer: &mut Customer, items: Vec<OrderItem>) -> Result<Order, PlaceOrderError> {
        let order = Order::new(Uuid::new_v4().to_string(), customer.id(), items)?;
        customer.add_reward_points(order.total() / 2.0)?;

        tracing::debug!(
            order_id = %order.id(),
            customer_id = %customer.id(),
            total = order.total(),
            reward_points = customer.reward_points(),
            "Order placed"
        );
        Ok(order)
    }

    pub fn total(orders: &[Order]) -> f64 {
        orders.iter().map(Order::total).sum()
    }
}
