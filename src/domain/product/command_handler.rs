use std::sync::Arc;
use anyhow::{Context, Result};

use crate::domain::shared::Repository;
use crate::event_dispatch::{EventDispatcher, EventEnvelope};

use super::commands::ProductCommand;
use super::entity::Product;
use super::events::ProductCreated;

// ============================================================================
// Product Command Handler
// ============================================================================

pub struct ProductCommandHandler<R: Repository<Product>> {
    repository: Arc<R>,
}

impl<R: Repository<Product>> ProductCommandHandler<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, command: ProductCommand, dispatcher: &EventDispatcher) -> Result<Product> {
        match command {
            ProductCommand::CreateProduct { product_id, name, price } => {
                let product = Product::new(product_id, name, price)?;
                self.repository.create(&product).await?;
                tracing::info!(product_id = %product.id(), price = product.price(), "Product created");

                let event = EventEnvelope::new(ProductCreated {
                    id: product.id().to_string(),
                    name: product.name().to_string(),
                    price: product.price(),
                });
                dispatcher
                    .notify(&event)
                    .with_context(|| format!("product {} created but handlers failed", product.id()))?;

                Ok(product)
            }

            ProductCommand::ChangePrice { product_id, price } => {
                let mut product = self.repository.find(&product_id).await?;
                product.change_price(price)?;
                self.repository.update(&product).await?;
                tracing::info!(product_id = %product.id(), price, "Product price changed");
                Ok(product)
            }
        }
    }
}
