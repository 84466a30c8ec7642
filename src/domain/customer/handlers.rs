use std::sync::Arc;

use crate::event_dispatch::{serialize_event, EventEnvelope, EventHandler, HandlerError};
use crate::infrastructure::notification::{Notification, NotificationChannel, NotificationKind};
use super::events::{CustomerAddressChanged, CustomerCreated};

// ============================================================================
// Customer Event Handlers
// ============================================================================

pub struct SendEmailWhenCustomerIsCreatedHandler {
    channel: Arc<dyn NotificationChannel>,
    recipient: String,
}

impl SendEmailWhenCustomerIsCreatedHandler {
    pub fn new(channel: Arc<dyn NotificationChannel>, recipient: impl Into<String>) -> Self {
        Self { channel, recipient: recipient.into() }
    }
}

impl EventHandler<CustomerCreated> for SendEmailWhenCustomerIsCreatedHandler {
    fn handle(&self, event: &EventEnvelope<CustomerCreated>) -> Result<(), HandlerError> {
        let customer = event.event_data();
        self.channel
            .deliver(Notification {
                kind: NotificationKind::Email,
                recipient: self.recipient.clone(),
                subject: "New customer".to_string(),
                body: format!("Customer {} ({}) was created", customer.name, customer.id),
            })
            .map_err(|e| HandlerError::Delivery(e.to_string()))
    }

    fn name(&self) -> &str {
        "SendEmailWhenCustomerIsCreated"
    }
}

/// Publishes the created customer, as JSON, to the customer queue
pub struct SendQueueWhenCustomerIsCreatedHandler {
    channel: Arc<dyn NotificationChannel>,
    queue: String,
}

impl SendQueueWhenCustomerIsCreatedHandler {
    pub fn new(channel: Arc<dyn NotificationChannel>, queue: impl Into<String>) -> Self {
        Self { channel, queue: queue.into() }
    }
}

impl EventHandler<CustomerCreated> for SendQueueWhenCustomerIsCreatedHandler {
    fn handle(&self, event: &EventEnvelope<CustomerCreated>) -> Result<(), HandlerError> {
        let body = serialize_event(event)?;

        self.channel
            .deliver(Notification {
                kind: NotificationKind::Queue,
                recipient: self.queue.clone(),
                subject: event.event_type.clone(),
                body,
            })
            .map_err(|e| HandlerError::Delivery(e.to_string()))
    }

    fn name(&self) -> &str {
        "SendQueueWhenCustomerIsCreated"
    }
}

pub struct SendEmailWhenCustomerAddressChangedHandler {
    channel: Arc<dyn NotificationChannel>,
    recipient: String,
}

impl SendEmailWhenCustomerAddressChangedHandler {
    pub fn new(channel: Arc<dyn NotificationChannel>, recipient: impl Into<String>) -> Self {
        Self { channel, recipient: recipient.into() }
    }
}

impl EventHandler<CustomerAddressChanged> for SendEmailWhenCustomerAddressChangedHandler {
    fn handle(&self, event: &EventEnvelope<CustomerAddressChanged>) -> Result<(), HandlerError> {
        let change = event.event_data();
        self.channel
            .deliver(Notification {
                kind: NotificationKind::Email,
                recipient: self.recipient.clone(),
                subject: "Customer address changed".to_string(),
                body: format!(
                    "Customer address: {}, {} changed to: {}",
                    change.id, change.name, change.address
                ),
            })
            .map_err(|e| HandlerError::Delivery(e.to_string()))
    }

    fn name(&self) -> &str {
        "SendEmailWhenCustomerAddressChanged"
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::{Address, Customer};
    use crate::event_dispatch::{DispatchError, EventDispatcher};
    use crate::infrastructure::notification::InMemoryChannel;

    fn customer_created_payload() -> CustomerCreated {
        CustomerCreated {
            id: "1".to_string(),
            name: "Customer 1".to_string(),
            address: Some(Address::new("Address 1", 123, "Zip Code 1", "City 1").unwrap()),
        }
    }

    #[test]
    fn test_register_customer_created_handlers() {
        let channel = Arc::new(InMemoryChannel::new());
        let mut dispatcher = EventDispatcher::new();
        let email = Arc::new(SendEmailWhenCustomerIsCreatedHandler::new(channel.clone(), "ops@store.local"));
        let queue = Arc::new(SendQueueWhenCustomerIsCreatedHandler::new(channel.clone(), "customers"));

        dispatcher.register::<CustomerCreated>(email.clone());
        dispatcher.register::<CustomerCreated>(queue.clone());

        let handlers = dispatcher.event_handlers::<CustomerCreated>().unwrap();
        assert_eq!(handlers.len(), 2);
        assert_eq!(handlers[0].name(), "SendEmailWhenCustomerIsCreated");
        assert_eq!(handlers[1].name(), "SendQueueWhenCustomerIsCreated");
        assert_eq!(dispatcher.registry_view()["CustomerCreatedEvent"], 2);
    }

    #[test]
    fn test_notify_customer_created_runs_email_then_queue() {
        let channel = Arc::new(InMemoryChannel::new());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register::<CustomerCreated>(Arc::new(
            SendEmailWhenCustomerIsCreatedHandler::new(channel.clone(), "ops@store.local"),
        ));
        dispatcher.register::<CustomerCreated>(Arc::new(
            SendQueueWhenCustomerIsCreatedHandler::new(channel.clone(), "customers"),
        ));

        let event = EventEnvelope::new(customer_created_payload());
        dispatcher.notify(&event).unwrap();

        let delivered = channel.delivered();
        assert_eq!(delivered.len(), 2);

        assert_eq!(delivered[0].kind, NotificationKind::Email);
        assert_eq!(delivered[0].recipient, "ops@store.local");
        assert_eq!(delivered[0].body, "Customer Customer 1 (1) was created");

        assert_eq!(delivered[1].kind, NotificationKind::Queue);
        assert_eq!(delivered[1].recipient, "customers");
        assert_eq!(delivered[1].subject, "CustomerCreatedEvent");
        let queued: EventEnvelope<CustomerCreated> = serde_json::from_str(&delivered[1].body).unwrap();
        assert_eq!(queued.event_id, event.event_id);
        assert_eq!(queued.event_data, customer_created_payload());
    }

    #[test]
    fn test_notify_customer_address_changed() {
        let channel = Arc::new(InMemoryChannel::new());
        let mut dispatcher = EventDispatcher::new();
        let handler = Arc::new(SendEmailWhenCustomerAddressChangedHandler::new(channel.clone(), "ops@store.local"));
        dispatcher.register::<CustomerAddressChanged>(handler.clone());
        assert_eq!(dispatcher.handler_count::<CustomerAddressChanged>(), 1);

        let mut customer = Customer::new("1", "Customer 1").unwrap();
        let address = Address::new("Address 1", 123, "Zip Code 1", "City 1").unwrap();
        customer.change_address(address.clone());

        dispatcher
            .notify(&EventEnvelope::new(CustomerAddressChanged {
                id: customer.id().to_string(),
                name: customer.name().to_string(),
                address,
            }))
            .unwrap();

        let delivered = channel.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(
            delivered[0].body,
            "Customer address: 1, Customer 1 changed to: Address 1, 123, Zip Code 1 City 1"
        );
    }

    #[test]
    fn test_unregistered_address_handler_is_not_invoked() {
        let channel = Arc::new(InMemoryChannel::new());
        let mut dispatcher = EventDispatcher::new();
        let handler = Arc::new(SendEmailWhenCustomerAddressChangedHandler::new(channel.clone(), "ops@store.local"));

        dispatcher.register::<CustomerAddressChanged>(handler.clone());
        dispatcher.unregister::<CustomerAddressChanged>(&handler);

        dispatcher
            .notify(&EventEnvelope::new(CustomerAddressChanged {
                id: "1".to_string(),
                name: "Customer 1".to_string(),
                address: Address::new("Address 1", 123, "Zip Code 1", "City 1").unwrap(),
            }))
            .unwrap();

        assert!(channel.delivered().is_empty());
        assert_eq!(dispatcher.event_handlers::<CustomerAddressChanged>().map(|h| h.len()), Some(0));
    }

    #[test]
    fn test_unregister_all_customer_handlers() {
        let channel = Arc::new(InMemoryChannel::new());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register::<CustomerCreated>(Arc::new(
            SendEmailWhenCustomerIsCreatedHandler::new(channel.clone(), "ops@store.local"),
        ));

        dispatcher.unregister_all();

        assert!(dispatcher.event_handlers::<CustomerCreated>().is_none());
    }

    #[test]
    fn test_failed_email_does_not_block_queue() {
        let broken: Arc<dyn NotificationChannel> = Arc::new(InMemoryChannel::unavailable("smtp down"));
        let queue_channel = Arc::new(InMemoryChannel::new());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register::<CustomerCreated>(Arc::new(
            SendEmailWhenCustomerIsCreatedHandler::new(broken, "ops@store.local"),
        ));
        dispatcher.register::<CustomerCreated>(Arc::new(
            SendQueueWhenCustomerIsCreatedHandler::new(queue_channel.clone(), "customers"),
        ));

        let err = dispatcher
            .notify(&EventEnvelope::new(customer_created_payload()))
            .unwrap_err();

        assert_eq!(queue_channel.delivered().len(), 1);
        let DispatchError::HandlersFailed { event_type, invoked, failures } = err;
        assert_eq!(event_type, "CustomerCreatedEvent");
        assert_eq!(invoked, 2);
        assert_eq!(failures[0].handler, "SendEmailWhenCustomerIsCreated");
        assert_eq!(failures[0].error.to_string(), "Delivery failed: Channel unavailable: smtp down");
    }
}
