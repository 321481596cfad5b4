//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Any long, non-cpu-bound operation (e.g. I/O, database operations,
//! etc.) must be expressed as futures or asynchronous functions so that worker threads keep serving other requests
//! while the operation is in flight.

use actix_web::{get, web, HttpResponse, Responder};
use epg_payment_engine::{
    api::{CallbackOutcome, CheckoutRequest, PaymentFlowError},
    traits::ShopDatabase,
    CatalogApi,
    PaymentFlowApi,
};
use log::*;

use crate::{config::GatewayConfig, data_objects::CallbackParams, errors::ServerError, helpers::render_redirect_form};

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

route!(products => Get "/api/products" impl ShopDatabase);
route!(checkout => Post "/checkout" impl ShopDatabase);
route!(success => Get "/success" impl ShopDatabase);

//----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Index   ----------------------------------------------------
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().content_type("text/html; charset=utf-8").body(include_str!("../static/index.html"))
}

//---------------------------------------------- Products  ----------------------------------------------------

/// Route handler for the products endpoint. Returns the full catalog as JSON.
pub async fn products<B: ShopDatabase>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("🛒️ Received product catalog request");
    let products = api.products().await.map_err(|e| {
        error!("🛒️ Could not fetch products. {e}");
        ServerError::BackendError(e.to_string())
    })?;
    Ok(HttpResponse::Ok().json(products))
}

//---------------------------------------------- Checkout  ----------------------------------------------------

/// Route handler for checkout requests.
///
/// Signs the payment request, records a PENDING order, and responds with a self-submitting HTML form that
/// forwards the payer's browser to the gateway. If the order cannot be recorded, no form is returned.
pub async fn checkout<B: ShopDatabase>(
    req: web::Json<CheckoutRequest>,
    api: web::Data<PaymentFlowApi<B>>,
    gateway: web::Data<GatewayConfig>,
) -> Result<HttpResponse, ServerError> {
    let req = req.into_inner();
    debug!("💳️ Received checkout request for transaction [{}]", req.transaction_uuid);
    let init = api.initiate_checkout(req).await.map_err(|e| {
        debug!("💳️ Checkout request was not accepted. {e}");
        ServerError::from(e)
    })?;
    info!("💳️ Order [{}] created for {}. Redirecting payer to gateway.", init.transaction_uuid, init.total_amount);
    let form = render_redirect_form(&init, gateway.get_ref());
    Ok(HttpResponse::Ok().content_type("text/html; charset=utf-8").body(form))
}

//---------------------------------------------- Callbacks ----------------------------------------------------

/// Route handler for the gateway's success redirect.
///
/// The payer's browser lands here after paying. The base64 `data` parameter carries the gateway's signed
/// verdict; the response bodies are plain text aimed at the payer, not at the gateway.
pub async fn success<B: ShopDatabase>(
    params: web::Query<CallbackParams>,
    api: web::Data<PaymentFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let Some(data) = params.into_inner().data else {
        debug!("📝️ Success callback arrived without a data parameter");
        return Ok(HttpResponse::BadRequest().body("No data"));
    };
    match api.handle_callback(&data).await {
        Ok(CallbackOutcome::Completed { transaction_uuid }) => {
            info!("📝️ Payment for order [{transaction_uuid}] verified. Order is COMPLETE.");
            Ok(HttpResponse::Ok().body("Payment successful!"))
        },
        Ok(CallbackOutcome::UnknownTransaction { transaction_uuid }) => {
            warn!("📝️ Verified callback for transaction [{transaction_uuid}], but no such order exists.");
            Ok(HttpResponse::Ok().body("Payment successful!"))
        },
        Ok(CallbackOutcome::VerificationFailed) => {
            warn!("🚨️ Callback signature verification failed. The order stays PENDING.");
            Ok(HttpResponse::Ok().body("Payment verification failed!"))
        },
        Err(PaymentFlowError::BadPayload(reason)) => {
            debug!("📝️ Could not decode callback payload. {reason}");
            Ok(HttpResponse::BadRequest().body("No data"))
        },
        Err(e) => {
            error!("📝️ Error handling success callback. {e}");
            Err(e.into())
        },
    }
}

/// Route handler for the gateway's failure redirect.
#[get("/failure")]
pub async fn failure() -> impl Responder {
    debug!("📝️ Payer was redirected to the failure URL");
    HttpResponse::Ok().body("Payment failed or canceled.")
}
