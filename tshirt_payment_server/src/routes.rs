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
//! execution.
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use log::*;
use tshirt_payment_engine::{
    helpers::{Signer, SystemClock},
    CallbackApi,
    CallbackError,
    CallbackPayload,
    OrderStore,
};

use crate::{
    config::{PaymentFormConfig, ServerOptions},
    data_objects::{PaymentForm, PaymentFormParams},
    errors::ServerError,
    helpers::get_remote_ip,
};

/// Where a customer whose payment was declined is sent.
pub const DECLINED_REDIRECT: &str = "/form/buy/?authorized=false";

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

#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Payment form  ----------------------------------------------------
/// Route handler for the payment form
///
/// Signs a fresh payment request for the price of a shirt and returns the hidden form fields the purchase page must
/// post to the gateway. Every call draws a new sequence number and timestamp, so two calls never return the same
/// fingerprint.
///
/// A declined payment sends the customer back here with `?authorized=false`; the value is echoed back so that the
/// page can tell the customer what happened.
#[get("/form/buy/")]
pub async fn payment_form(
    params: web::Query<PaymentFormParams>,
    signer: web::Data<Signer>,
    form: web::Data<PaymentFormConfig>,
) -> impl Responder {
    let request = signer.sign(&form.price, &SystemClock, &mut rand::thread_rng());
    debug!("💻️ Issued payment form with sequence {} for {}", request.sequence, request.amount);
    let PaymentFormParams { authorized } = params.into_inner();
    HttpResponse::Ok().json(PaymentForm { form_url: form.payment_url.clone(), request, authorized })
}

//----------------------------------------------   Callbacks  ----------------------------------------------------
route!(callback_query => Get "/form/thanks/" impl OrderStore);
/// Route handler for gateway callbacks that arrive as a query string (the customer's browser is redirected back
/// with a GET).
pub async fn callback_query<B: OrderStore>(
    req: HttpRequest,
    fields: web::Query<Vec<(String, String)>>,
    api: web::Data<CallbackApi<B>>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError> {
    let payload = fields.into_inner().into_iter().collect::<CallbackPayload>();
    process_callback(&req, payload, api.get_ref(), options.get_ref()).await
}

route!(callback_form => Post "/form/thanks/" impl OrderStore);
/// Route handler for gateway callbacks that arrive as a url-encoded form body.
pub async fn callback_form<B: OrderStore>(
    req: HttpRequest,
    fields: web::Form<Vec<(String, String)>>,
    api: web::Data<CallbackApi<B>>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError> {
    let payload = fields.into_inner().into_iter().collect::<CallbackPayload>();
    process_callback(&req, payload, api.get_ref(), options.get_ref()).await
}

async fn process_callback<B: OrderStore>(
    req: &HttpRequest,
    payload: CallbackPayload,
    api: &CallbackApi<B>,
    options: &ServerOptions,
) -> Result<HttpResponse, ServerError> {
    let remote_ip = get_remote_ip(req, options.use_x_forwarded_for, options.use_forwarded)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "an unknown address".to_string());
    trace!("💻️ Received payment callback from {remote_ip}");
    match api.handle(&payload).await {
        Ok(order) => {
            info!("💻️ Order {} created for transaction {} ({remote_ip})", order.id, order.transaction_id);
            Ok(HttpResponse::Created().json(order))
        },
        Err(e) => {
            match &e {
                CallbackError::HashMismatch(tid) => {
                    warn!("💻️🚨️ Rejected callback for {tid} from {remote_ip}. The integrity hash does not match.")
                },
                CallbackError::Replay(tid) => warn!("💻️🔁️ Rejected replayed callback for {tid} from {remote_ip}."),
                CallbackError::Unauthorized { transaction_id, response_code } => {
                    info!("💻️ Payment {transaction_id} was declined (response code {response_code}). Redirecting.")
                },
                CallbackError::MalformedRequest(_) => debug!("💻️ Malformed callback from {remote_ip}. {e}"),
                CallbackError::StoreError(_) => error!("💻️ Could not process callback from {remote_ip}. {e}"),
            }
            Err(e.into())
        },
    }
}
