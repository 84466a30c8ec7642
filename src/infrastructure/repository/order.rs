use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::checkout::{Order, OrderError, OrderItem};
use crate::domain::shared::{Repository, RepositoryError};

const ENTITY: &str = "Order";

#[derive(Debug, Clone)]
struct OrderItemModel {
    id: String,
    order_id: String,
    product_id: String,
    name: String,
    price: f64,
    quantity: i32,
}

/// Order row with its item rows; `total` is denormalized at write time
#[derive(Debug, Clone)]
struct OrderModel {
    id: String,
    customer_id: String,
    total: f64,
    items: Vec<OrderItemModel>,
}

impl OrderModel {
    fn from_entity(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            customer_id: order.customer_id().to_string(),
            total: order.total(),
            items: order
                .items()
                .iter()
                .map(|item| OrderItemModel {
                    id: item.id().to_string(),
                    order_id: order.id().to_string(),
                    product_id: item.product_id().to_string(),
                    name: item.name().to_string(),
                    price: item.price(),
                    quantity: item.quantity(),
                })
                .collect(),
        }
    }

    fn into_entity(self) -> Result<Order, RepositoryError> {
        let id = self.id.clone();
        let corrupted = |e: OrderError| RepositoryError::Corrupted {
            entity: ENTITY,
            id: id.clone(),
            reason: e.to_string(),
        };

        if let Some(stray) = self.items.iter().find(|item| item.order_id != self.id) {
            return Err(RepositoryError::Corrupted {
                entity: ENTITY,
                id: self.id.clone(),
                reason: format!("item {} belongs to order {}", stray.id, stray.order_id),
            });
        }

        let items = self
            .items
            .into_iter()
            .map(|item| OrderItem::new(item.id, item.name, item.price, item.product_id, item.quantity))
            .collect::<Result<Vec<_>, _>>()
            .map_err(&corrupted)?;

        Order::new(self.id, self.customer_id, items).map_err(&corrupted)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    rows: RwLock<HashMap<String, OrderModel>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored total of an order, as written by the last create/update
    pub async fn stored_total(&self, id: &str) -> Option<f64> {
        self.rows.read().await.get(id).map(|row| row.total)
    }
}

#[async_trait]
impl Repository<Order> for InMemoryOrderRepository {
    async fn create(&self, entity: &Order) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(entity.id()) {
            return Err(RepositoryError::AlreadyExists { entity: ENTITY, id: entity.id().to_string() });
        }
        rows.insert(entity.id().to_string(), OrderModel::from_entity(entity));
        Ok(())
    }

    /// Replaces the item rows and the stored total in one step
    async fn update(&self, entity: &Order) -> Result<(), RepositoryError> {
        let replacement = OrderModel::from_entity(entity);
        let mut rows = self.rows.write().await;
        match rows.get_mut(entity.id()) {
            Some(row) => {
                tracing::debug!(
                    order_id = %entity.id(),
                    old_items = row.items.len(),
                    new_items = replacement.items.len(),
                    total = replacement.total,
                    "Replacing order items"
                );
                *row = replacement;
                Ok(())
            }
            None => Err(RepositoryError::NotFound { entity: ENTITY, id: entity.id().to_string() }),
        }
    }

    async fn find(&self, id: &str) -> Result<Order, RepositoryError> {
        let rows = self.rows.read().await;
        rows.get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound { entity: ENTITY, id: id.to_string() })?
            .into_entity()
    }

    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = self.rows.read().await;
        let mut orders = rows
            .values()
            .cloned()
            .map(OrderModel::into_entity)
            .collect::<Result<Vec<_>, _>>()?;
        orders.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: f64, quantity: i32) -> OrderItem {
        OrderItem::new(id, format!("Product {id}"), price, format!("p{id}"), quantity).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_order() {
        let repository = InMemoryOrderRepository::new();
        let order = Order::new("123", "c1", vec![item("1", 10.0, 2)]).unwrap();

        repository.create(&order).await.unwrap();

        let found = repository.find("123").await.unwrap();
        assert_eq!(found, order);
        assert_eq!(repository.stored_total("123").await, Some(20.0));
    }

    #[tokio::test]
    async fn test_update_replaces_items_and_total() {
        let repository = InMemoryOrderRepository::new();
        let mut order = Order::new("123", "c1", vec![item("1", 10.0, 2)]).unwrap();
        repository.create(&order).await.unwrap();

        order.replace_items(vec![item("2", 5.0, 1), item("3", 7.5, 2)]).unwrap();
        repository.update(&order).await.unwrap();

        let found = repository.find("123").await.unwrap();
        let ids: Vec<&str> = found.items().iter().map(OrderItem::id).collect();
        assert_eq!(ids, vec!["2", "3"]);
        assert_eq!(repository.stored_total("123").await, Some(20.0));
    }

    #[tokio::test]
    async fn test_order_not_found() {
        let repository = InMemoryOrderRepository::new();
        let order = Order::new("404", "c1", vec![item("1", 10.0, 1)]).unwrap();

        assert_eq!(
            repository.find("404").await,
            Err(RepositoryError::NotFound { entity: "Order", id: "404".to_string() })
        );
        assert!(repository.update(&order).await.is_err());
    }

    #[tokio::test]
    async fn test_find_all_orders() {
        let repository = InMemoryOrderRepository::new();
        let order1 = Order::new("1", "c1", vec![item("1", 10.0, 1)]).unwrap();
        let order2 = Order::new("2", "c1", vec![item("2", 20.0, 1)]).unwrap();
        repository.create(&order2).await.unwrap();
        repository.create(&order1).await.unwrap();

        assert_eq!(repository.find_all().await.unwrap(), vec![order1, order2]);
    }

    #[tokio::test]
    async fn test_item_row_from_another_order_is_corrupted() {
        let repository = InMemoryOrderRepository::new();
        let order = Order::new("1", "c1", vec![item("1", 10.0, 1)]).unwrap();
        let mut row = OrderModel::from_entity(&order);
        row.items[0].order_id = "2".to_string();
        repository.rows.write().await.insert("1".to_string(), row);

        match repository.find("1").await {
            Err(RepositoryError::Corrupted { entity, id, reason }) => {
                assert_eq!(entity, "Order");
                assert_eq!(id, "1");
                assert_eq!(reason, "item 1 belongs to order 2");
            }
            other => panic!("expected corrupted order, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_order_row_without_items_is_corrupted() {
        let repository = InMemoryOrderRepository::new();
        let order = Order::new("1", "c1", vec![item("1", 10.0, 1)]).unwrap();
        let mut row = OrderModel::from_entity(&order);
        row.items.clear();
        repository.rows.write().await.insert("1".to_string(), row);

        assert!(matches!(
            repository.find_all().await,
            Err(RepositoryError::Corrupted { entity: "Order", .. })
        ));
    }
}
