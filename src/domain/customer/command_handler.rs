use std::sync::Arc;
use uuid::Uuid;
use anyhow::{Context, Result};

use crate::domain::shared::Repository;
use crate::event_dispatch::{EventDispatcher, EventEnvelope};

use super::commands::CustomerCommand;
use super::entity::Customer;
use super::events::{CustomerAddressChanged, CustomerCreated};

// ============================================================================
// Customer Command Handler
// ============================================================================
//
// Orchestrates: Command → Entity → Repository → Event Dispatcher
//
// Events are only dispatched once the repository accepted the change. A
// handler failure is reported to the caller but does not roll the change back.
//
// ============================================================================

pub struct CustomerCommandHandler<R: Repository<Customer>> {
    repository: Arc<R>,
}

impl<R: Repository<Customer>> CustomerCommandHandler<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Handle a command, persist the result and notify subscribers
    pub async fn handle(
        &self,
        command: CustomerCommand,
        dispatcher: &EventDispatcher,
    ) -> Result<Customer> {
        let correlation_id = Uuid::new_v4();

        match command {
            CustomerCommand::CreateCustomer { customer_id, name, address } => {
                let mut customer = Customer::new(customer_id, name)?;
                if let Some(address) = address {
                    customer.change_address(address);
                }

                self.repository.create(&customer).await?;
                tracing::info!(customer_id = %customer.id(), "Customer created");

                let event = EventEnvelope::new(CustomerCreated {
                    id: customer.id().to_string(),
                    name: customer.name().to_string(),
                    address: customer.address().cloned(),
                })
                .with_correlation(correlation_id);

                dispatcher
                    .notify(&event)
                    .with_context(|| format!("customer {} created but handlers failed", customer.id()))?;

                Ok(customer)
            }

            CustomerCommand::ChangeAddress { customer_id, address } => {
                let mut customer = self.repository.find(&customer_id).await?;
                customer.change_address(address.clone());

                self.repository.update(&customer).await?;
                tracing::info!(customer_id = %customer.id(), address = %address, "Customer address changed");

                let event = EventEnvelope::new(CustomerAddressChanged {
                    id: customer.id().to_string(),
                    name: customer.name().to_string(),
                    address,
                })
                .with_correlation(correlation_id);

                dispatcher
                    .notify(&event)
                    .with_context(|| format!("customer {} address changed but handlers failed", customer.id()))?;

                Ok(customer)
            }

            CustomerCommand::ActivateCustomer { customer_id } => {
                let mut customer = self.repository.find(&customer_id).await?;
                customer.activate()?;
                self.repository.update(&customer).await?;
                tracing::info!(customer_id = %customer.id(), "Customer activated");
                Ok(customer)
            }

            CustomerCommand::DeactivateCustomer { customer_id } => {
                let mut customer = self.repository.find(&customer_id).await?;
                customer.deactivate();
                self.repository.update(&customer).await?;
                tracing::info!(customer_id = %customer.id(), "Customer deactivated");
                Ok(customer)
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
