use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::customer::{Address, Customer, CustomerError};
use crate::domain::shared::{Repository, RepositoryError};

const ENTITY: &str = "Customer";

/// Stored row, flattened the way a `customers` table would hold it
#[derive(Debug, Clone)]
struct CustomerModel {
    id: String,
    name: String,
    street: Option<String>,
    number: Option<u32>,
    zipcode: Option<String>,
    city: Option<String>,
    active: bool,
    reward_points: f64,
}

impl CustomerModel {
    fn from_entity(customer: &Customer) -> Self {
        let address = customer.address();
        Self {
            id: customer.id().to_string(),
            name: customer.name().to_string(),
            street: address.map(|a| a.street().to_string()),
            number: address.map(Address::number),
            zipcode: address.map(|a| a.zip().to_string()),
            city: address.map(|a| a.city().to_string()),
            active: customer.is_active(),
            reward_points: customer.reward_points(),
        }
    }

    fn into_entity(self) -> Result<Customer, RepositoryError> {
        let id = self.id.clone();
        let corrupted = |e: CustomerError| RepositoryError::Corrupted {
            entity: ENTITY,
            id: id.clone(),
            reason: e.to_string(),
        };

        let address = match (self.street, self.number, self.zipcode, self.city) {
            (Some(street), Some(number), Some(zip), Some(city)) => {
                Some(Address::new(street, number, zip, city).map_err(&corrupted)?)
            }
            _ => None,
        };

        Customer::restore(self.id, self.name, address, self.active, self.reward_points)
            .map_err(&corrupted)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    rows: RwLock<HashMap<String, CustomerModel>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Customer> for InMemoryCustomerRepository {
    async fn create(&self, entity: &Customer) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(entity.id()) {
            return Err(RepositoryError::AlreadyExists { entity: ENTITY, id: entity.id().to_string() });
        }
        rows.insert(entity.id().to_string(), CustomerModel::from_entity(entity));
        Ok(())
    }

    async fn update(&self, entity: &Customer) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(entity.id()) {
            Some(row) => {
                *row = CustomerModel::from_entity(entity);
                Ok(())
            }
            None => Err(RepositoryError::NotFound { entity: ENTITY, id: entity.id().to_string() }),
        }
    }

    async fn find(&self, id: &str) -> Result<Customer, RepositoryError> {
        let rows = self.rows.read().await;
        rows.get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound { entity: ENTITY, id: id.to_string() })?
            .into_entity()
    }

    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = self.rows.read().await;
        let mut customers = rows
            .values()
            .cloned()
            .map(CustomerModel::into_entity)
            .collect::<Result<Vec<_>, _>>()?;
        customers.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(customers)
    }
}
