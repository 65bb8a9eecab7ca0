//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests:
//! ```nocompile
//!     fn my_handler() -> impl Responder {
//!         std::thread::sleep(Duration::from_secs(5)); // <-- Bad practice! Will cause the current worker thread to
//! hang!
//!     }
//! ```
//! For this reason, any long, non-cpu-bound operation (e.g. I/O, database operations, etc.) should be expressed as
//! futures or asynchronous functions. Async handlers get executed concurrently by worker threads and thus don’t block
//! execution:
//!
//! ```nocompile
//!     async fn my_handler() -> impl Responder {
//!         tokio::time::sleep(Duration::from_secs(5)).await; // <-- Ok. Worker thread will handle other requests here
//!     }
//! ```
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use payment_engine::{
    db_types::total_amount,
    reconcile_objects::ReconcileOutcome,
    NotificationReconciler,
    OrderService,
    OrderStatusRelay,
    PaymentOrchestrator,
    PaymentProvider,
    PaymentStore,
};
use serde_json::Value;

use crate::{
    data_objects::{CreatePaymentRequest, JsonResponse, StatusUpdateResponse, UpdateStatusParams},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Payments  ----------------------------------------------------
route!(create_payment => Post "/payments" impl PaymentProvider, PaymentStore);
/// Issues a QR code for an order and records a pending payment for it.
///
/// The order total is always recomputed from the product prices. A `totalAmount` supplied by the caller that does
/// not agree is logged and ignored.
pub async fn create_payment<P, S>(
    body: web::Json<CreatePaymentRequest>,
    api: web::Data<PaymentOrchestrator<P, S>>,
) -> Result<HttpResponse, ServerError>
where
    P: PaymentProvider,
    S: PaymentStore,
{
    let request = body.into_inner();
    debug!("💻️ POST payment for order {}", request.order_id);
    let computed = total_amount(&request.products);
    if let Some(claimed) = request.total_amount.filter(|claimed| *claimed != computed) {
        warn!(
            "💻️ Order {} claims a total of {claimed}, but its products add up to {computed}. Using {computed}.",
            request.order_id
        );
    }
    let qr = api.process_order_payment(&request.order_id, &request.client_id, request.products).await?;
    Ok(HttpResponse::Created().json(qr))
}

route!(payment_by_id => Get "/payments/{id}" impl PaymentProvider, PaymentStore);
pub async fn payment_by_id<P, S>(
    path: web::Path<i64>,
    api: web::Data<PaymentOrchestrator<P, S>>,
) -> Result<HttpResponse, ServerError>
where
    P: PaymentProvider,
    S: PaymentStore,
{
    let id = path.into_inner();
    debug!("💻️ GET payment #{id}");
    let payment = api.fetch_payment(id).await.map_err(|e| {
        debug!("💻️ Could not fetch payment #{id}. {e}");
        ServerError::BackendError(e.to_string())
    })?;
    match payment {
        Some(payment) => Ok(HttpResponse::Ok().json(payment)),
        None => Err(ServerError::NoRecordFound(format!("No payment with id {id}"))),
    }
}

//----------------------------------------------   Webhooks  ----------------------------------------------------
route!(webhook => Post "/webhook" impl PaymentProvider, OrderService, PaymentStore);
/// Mercado Pago notification endpoint.
///
/// Every well-formed JSON body is acknowledged with a `200`, whatever the outcome of reconciliation. Otherwise the
/// provider would keep redelivering notifications that cannot succeed. The outcome is reported in the body.
pub async fn webhook<P, O, S>(
    body: web::Json<Value>,
    api: web::Data<NotificationReconciler<P, O, S>>,
) -> HttpResponse
where
    P: PaymentProvider,
    O: OrderService,
    S: PaymentStore,
{
    trace!("💻️ Received webhook request");
    let response = match api.handle_webhook(&body).await {
        Ok(ReconcileOutcome::Failed(e)) => JsonResponse::failure(e),
        Ok(outcome) => JsonResponse::success(outcome),
        Err(e) => {
            log!(e.log_level(), "💻️ Notification could not be reconciled. {e}");
            JsonResponse::failure(e)
        },
    };
    HttpResponse::Ok().json(response)
}

route!(merchant_order_webhook => Post "/webhook/merchant_orders/{id}" impl PaymentProvider, OrderService, PaymentStore);
pub async fn merchant_order_webhook<P, O, S>(
    path: web::Path<String>,
    api: web::Data<NotificationReconciler<P, O, S>>,
) -> Result<HttpResponse, ServerError>
where
    P: PaymentProvider,
    O: OrderService,
    S: PaymentStore,
{
    let merchant_order_id = path.into_inner();
    debug!("💻️ POST merchant order notification for #{merchant_order_id}");
    let outcome = api.reconcile_merchant_order(&merchant_order_id).await.map_err(|e| {
        log!(e.log_level(), "💻️ Merchant order {merchant_order_id} could not be reconciled. {e}");
        e
    })?;
    Ok(HttpResponse::Ok().json(JsonResponse::success(outcome)))
}

//----------------------------------------------   Production  ----------------------------------------------------
route!(orders_by_status => Get "/production/status/{status}" impl OrderService);
/// Proxies the order service's order list for a status. The downstream payload is returned untouched.
pub async fn orders_by_status<O: OrderService>(
    path: web::Path<String>,
    api: web::Data<OrderStatusRelay<O>>,
) -> Result<HttpResponse, ServerError> {
    let status = path.into_inner();
    debug!("💻️ GET orders with status '{status}'");
    let orders = api
        .fetch_orders_by_status(&status)
        .await
        .map_err(|_| ServerError::OrderServiceError("Failed to fetch orders".into()))?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(update_order_status => Patch "/production/{order_id}/status" impl OrderService);
pub async fn update_order_status<O: OrderService>(
    path: web::Path<String>,
    body: web::Json<UpdateStatusParams>,
    api: web::Data<OrderStatusRelay<O>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    let status = body.into_inner().status.filter(|s| !s.trim().is_empty()).ok_or_else(|| {
        debug!("💻️ Status update for order {order_id} has no status");
        ServerError::ValidationError("Status is required".into())
    })?;
    debug!("💻️ PATCH order {order_id} status to '{status}'");
    api.update_order_status(&order_id, &status).await.map_err(|e| ServerError::OrderServiceError(e.to_string()))?;
    let response = StatusUpdateResponse { message: "Order status updated successfully".into(), order_id, status };
    Ok(HttpResponse::Ok().json(response))
}
