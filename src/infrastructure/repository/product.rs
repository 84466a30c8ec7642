use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::product::Product;
use crate::domain::shared::{Repository, RepositoryError};

const ENTITY: &str = "Product";

#[derive(Debug, Clone)]
struct ProductModel {
    id: String,
    name: String,
    price: f64,
}

impl ProductModel {
    fn from_entity(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name().to_string(),
            price: product.price(),
        }
    }

    fn into_entity(self) -> Result<Product, RepositoryError> {
        let id = self.id.clone();
        Product::new(self.id, self.name, self.price).map_err(|e| RepositoryError::Corrupted {
            entity: ENTITY,
            id,
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    rows: RwLock<HashMap<String, ProductModel>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Product> for InMemoryProductRepository {
    async fn create(&self, entity: &Product) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(entity.id()) {
            return Err(RepositoryError::AlreadyExists { entity: ENTITY, id: entity.id().to_string() });
        }
        rows.insert(entity.id().to_string(), ProductModel::from_entity(entity));
        Ok(())
    }

    async fn update(&self, entity: &Product) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(entity.id()) {
            Some(row) => {
                *row = ProductModel::from_entity(entity);
                Ok(())
            }
            None => Err(RepositoryError::NotFound { entity: ENTITY, id: entity.id().to_string() }),
        }
    }

    async fn find(&self, id: &str) -> Result<Product, RepositoryError> {
        let rows = self.rows.read().await;
        rows.get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound { entity: ENTITY, id: id.to_string() })?
            .into_entity()
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = self.rows.read().await;
        let mut products = rows
            .values()
            .cloned()
            .map(ProductModel::into_entity)
            .collect::<Result<Vec<_>, _>>()?;
        products.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(products)
    }
}
