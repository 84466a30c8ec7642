use std::sync::Arc;

use crate::event_dispatch::{EventEnvelope, EventHandler, HandlerError};
use crate::infrastructure::notification::{Notification, NotificationChannel, NotificationKind};
use super::events::ProductCreated;

pub struct SendEmailWhenProductIsCreatedHandler {
    channel: Arc<dyn NotificationChannel>,
    recipient: String,
}

impl SendEmailWhenProductIsCreatedHandler {
    pub fn new(channel: Arc<dyn NotificationChannel>, recipient: impl Into<String>) -> Self {
        Self { channel, recipient: recipient.into() }
    }
}

impl EventHandler<ProductCreated> for SendEmailWhenProductIsCreatedHandler {
    fn handle(&self, event: &EventEnvelope<ProductCreated>) -> Result<(), HandlerError> {
        let product = event.event_data();
        self.channel
            .deliver(Notification {
                kind: NotificationKind::Email,
                recipient: self.recipient.clone(),
                subject: "New product".to_string(),
                body: format!("Product {} ({}) created at {:.2}", product.name, product.id, product.price),
            })
            .map_err(|e| HandlerError::Delivery(e.to_string()))
    }

    fn name(&self) -> &str {
        "SendEmailWhenProductIsCreated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_dispatch::EventDispatcher;
    use crate::infrastructure::notification::InMemoryChannel;

    #[test]
    fn test_product_created_email() {
        let channel = Arc::new(InMemoryChannel::new());
        let mut dispatcher = EventDispatcher::new();
        let handler = Arc::new(SendEmailWhenProductIsCreatedHandler::new(channel.clone(), "ops@store.local"));

        dispatcher.register::<ProductCreated>(handler.clone());
        assert_eq!(dispatcher.handler_count::<ProductCreated>(), 1);

        dispatcher
            .notify(&EventEnvelope::new(ProductCreated {
                id: "1".to_string(),
                name: "Product 1".to_string(),
                price: 10.0,
            }))
            .unwrap();

        let delivered = channel.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].body, "Product Product 1 (1) created at 10.00");
    }
}
