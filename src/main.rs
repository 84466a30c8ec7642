use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ddd_events::config::AppConfig;
use ddd_events::domain::checkout::{OrderItem, OrderService};
use ddd_events::domain::customer::{
    Address, CustomerAddressChanged, CustomerCommand, CustomerCommandHandler, CustomerCreated,
    SendEmailWhenCustomerAddressChangedHandler, SendEmailWhenCustomerIsCreatedHandler,
    SendQueueWhenCustomerIsCreatedHandler,
};
use ddd_events::domain::product::{
    ProductCommand, ProductCommandHandler, ProductCreated, SendEmailWhenProductIsCreatedHandler,
};
use ddd_events::domain::shared::Repository;
use ddd_events::event_dispatch::EventDispatcher;
use ddd_events::infrastructure::notification::{LogChannel, NotificationChannel};
use ddd_events::infrastructure::repository::{
    InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    // RUST_LOG wins over the built-in default, e.g. RUST_LOG=trace cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting domain events demo");

    // === 1. Wire handlers into an explicit dispatcher ===
    let channel: Arc<dyn NotificationChannel> = Arc::new(LogChannel);
    let mut dispatcher = EventDispatcher::new();

    dispatcher.register::<CustomerCreated>(Arc::new(SendEmailWhenCustomerIsCreatedHandler::new(
        channel.clone(),
        config.notify_email.clone(),
    )));
    dispatcher.register::<CustomerCreated>(Arc::new(SendQueueWhenCustomerIsCreatedHandler::new(
        channel.clone(),
        config.customer_queue.clone(),
    )));
    let address_email = Arc::new(SendEmailWhenCustomerAddressChangedHandler::new(
        channel.clone(),
        config.notify_email.clone(),
    ));
    dispatcher.register::<CustomerAddressChanged>(address_email.clone());
    dispatcher.register::<ProductCreated>(Arc::new(SendEmailWhenProductIsCreatedHandler::new(
        channel.clone(),
        config.notify_email.clone(),
    )));

    tracing::info!(registry = ?dispatcher.registry_view(), "Event handlers registered");

    // === 2. Customer lifecycle ===
    let customers = Arc::new(InMemoryCustomerRepository::new());
    let customer_handler = CustomerCommandHandler::new(customers.clone());

    customer_handler
        .handle(
            CustomerCommand::CreateCustomer {
                customer_id: "123".to_string(),
                name: "Mauricio Frasson".to_string(),
                address: None,
            },
            &dispatcher,
        )
        .await?;

    customer_handler
        .handle(
            CustomerCommand::ChangeAddress {
                customer_id: "123".to_string(),
                address: Address::new("Rua dois", 2, "12345-678", "Sao Paulo")?,
            },
            &dispatcher,
        )
        .await?;

    let mut customer = customer_handler
        .handle(CustomerCommand::ActivateCustomer { customer_id: "123".to_string() }, &dispatcher)
        .await?;

    // === 3. Products ===
    let products = Arc::new(InMemoryProductRepository::new());
    let product_handler = ProductCommandHandler::new(products.clone());

    for (id, name, price) in [("P1", "Product 1", 10.0), ("P2", "Product 2", 15.0)] {
        product_handler
            .handle(
                ProductCommand::CreateProduct {
                    product_id: id.to_string(),
                    name: name.to_string(),
                    price,
                },
                &dispatcher,
            )
            .await?;
    }

    // === 4. Checkout ===
    let items = vec![
        OrderItem::new("1", "Item 1", 10.0, "P1", 1)?,
        OrderItem::new("2", "Item 2", 15.0, "P2", 1)?,
    ];
    let order = OrderService::place_order(&mut customer, items)?;
    customers.update(&customer).await?;

    let orders = InMemoryOrderRepository::new();
    orders.create(&order).await?;

    tracing::info!(
        order_id = %order.id(),
        total = order.total(),
        reward_points = customer.reward_points(),
        "Order placed"
    );

    // A handler that is no longer registered stays silent
    dispatcher.unregister::<CustomerAddressChanged>(&address_email);
    customer_handler
        .handle(
            CustomerCommand::ChangeAddress {
                customer_id: "123".to_string(),
                address: Address::new("Rua tres", 3, "12345-679", "Campinas")?,
            },
            &dispatcher,
        )
        .await?;

    tracing::info!(registry = ?dispatcher.registry_view(), "Demo complete");

    Ok(())
}
