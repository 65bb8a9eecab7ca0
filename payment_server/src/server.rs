use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use payment_engine::{
    create_database_if_missing,
    NotificationReconciler,
    OrderStatusRelay,
    PaymentOrchestrator,
    SqliteDatabase,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::{mercadopago::MercadoPagoGateway, order_service::OrderServiceApi},
    routes::{
        health,
        CreatePaymentRoute,
        MerchantOrderWebhookRoute,
        OrdersByStatusRoute,
        PaymentByIdRoute,
        UpdateOrderStatusRoute,
        WebhookRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    if create_database_if_missing(&config.database_url)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?
    {
        info!("🗃️ Created a new payments database at {}", config.database_url);
    }
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.migrate().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let provider = MercadoPagoGateway::new(config.mercadopago.clone())
        .map_err(|e| ServerError::ConfigurationError(e.to_string()))?;
    let orders = OrderServiceApi::new(&config.order_service)
        .map_err(|e| ServerError::ConfigurationError(e.to_string()))?;
    let srv = create_server_instance(config, db, provider, orders)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    provider: MercadoPagoGateway,
    orders: OrderServiceApi,
) -> Result<Server, ServerError> {
    let options = config.reconciler_options();
    let notification_url = config.notification_url.clone();
    let srv = HttpServer::new(move || {
        let orchestrator = PaymentOrchestrator::new(provider.clone(), db.clone(), notification_url.as_str());
        let reconciler = NotificationReconciler::new(provider.clone(), orders.clone(), db.clone(), options);
        let relay = OrderStatusRelay::new(orders.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("payments::access_log"))
            .app_data(web::Data::new(orchestrator))
            .app_data(web::Data::new(reconciler))
            .app_data(web::Data::new(relay))
            .service(health)
            .service(CreatePaymentRoute::<MercadoPagoGateway, SqliteDatabase>::new())
            .service(PaymentByIdRoute::<MercadoPagoGateway, SqliteDatabase>::new())
            .service(WebhookRoute::<MercadoPagoGateway, OrderServiceApi, SqliteDatabase>::new())
            .service(MerchantOrderWebhookRoute::<MercadoPagoGateway, OrderServiceApi, SqliteDatabase>::new())
            .service(OrdersByStatusRoute::<OrderServiceApi>::new())
            .service(UpdateOrderStatusRoute::<OrderServiceApi>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
