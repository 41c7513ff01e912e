//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use log::*;
use order_relay_engine::{db_types::OrderId, traits::RelayDatabase, OrderFlowApi, OrderFlowError};
use stripe_tools::{CheckoutSession, Event, EventVerifier, WebhookError, STRIPE_SIGNATURE_HEADER};

use crate::{data_objects::JsonResponse, errors::ServerError, integrations::stripe::CustomerResolver};

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

// ----------------------------------------------   Webhook  ---------------------------------------------------
route!(stripe_webhook => Post "/webhook" impl RelayDatabase, CustomerResolver);
/// Route handler for incoming Stripe payment events.
///
/// The raw body is taken as bytes because the signature covers the payload verbatim; deserializing and
/// re-serializing would break verification.
///
/// Status codes follow Stripe's retry contract: an unverifiable signature or a malformed order key gets a 4xx (the
/// event can never succeed), an order that is not in the database gets a 404 (the platform may still be writing it,
/// and a retry can succeed), and everything else is acknowledged with a 200 so that Stripe does not retry. Business
/// failures inside a 200 are reported in the response body and the logs.
pub async fn stripe_webhook<B, C>(
    req: HttpRequest,
    body: web::Bytes,
    verifier: web::Data<EventVerifier>,
    stripe: web::Data<C>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: RelayDatabase,
    C: CustomerResolver,
{
    trace!("💳️ Received webhook request: {}", req.uri());
    let signature = req
        .headers()
        .get(STRIPE_SIGNATURE_HEADER)
        .ok_or(ServerError::MissingSignatureHeader)?
        .to_str()
        .map_err(|e| ServerError::InvalidSignature(e.to_string()))?;
    let event = verifier.verify(&body, signature).map_err(|e| {
        warn!("💳️ Webhook verification failed. {e}");
        match e {
            // The signature checked out but the body isn't a well-formed event.
            WebhookError::InvalidPayload(_) => ServerError::MalformedEvent(e.to_string()),
            _ => ServerError::InvalidSignature(e.to_string()),
        }
    })?;
    let result = match event {
        Event::CheckoutSessionCompleted(session) => {
            handle_checkout_completed(session, stripe.as_ref(), api.as_ref()).await?
        },
        Event::PaymentIntentSucceeded(intent) => {
            debug!("💳️ Payment intent {} succeeded for {} cents. No action needed.", intent.id, intent.amount);
            JsonResponse::success("Payment intent acknowledged.")
        },
        Event::Unknown(event_type) => {
            debug!("💳️ Unhandled event type: {event_type}");
            JsonResponse::success(format!("Unhandled event type: {event_type}"))
        },
    };
    Ok(HttpResponse::Ok().json(result))
}

/// The completed-checkout path: session → customer → cart → order key → payment confirmation.
async fn handle_checkout_completed<B, C>(
    session: CheckoutSession,
    stripe: &C,
    api: &OrderFlowApi<B>,
) -> Result<JsonResponse, ServerError>
where
    B: RelayDatabase,
    C: CustomerResolver,
{
    debug!("💳️ Checkout session {} completed.", session.id);
    let Some(customer_id) = session.customer else {
        warn!("💳️ Checkout session {} has no customer attached. Nothing to reconcile.", session.id);
        return Ok(JsonResponse::failure("Checkout session has no customer."));
    };
    let customer = match stripe.resolve_customer(&customer_id).await {
        Ok(customer) => customer,
        Err(e) => {
            warn!("💳️ Could not retrieve customer {customer_id}. {e}");
            return Ok(JsonResponse::failure(format!("Could not retrieve customer {customer_id}.")));
        },
    };
    let cart = match customer.cart() {
        Ok(cart) => cart,
        Err(e) => {
            warn!("💳️ Could not read the cart for customer {customer_id}. {e}");
            return Ok(JsonResponse::failure(format!("Could not read the cart for customer {customer_id}.")));
        },
    };
    // A checkout session settles a single order, so every cart item carries the same order key and the first one
    // identifies the order.
    let Some(item) = cart.first() else {
        warn!("💳️ The cart for customer {customer_id} is empty. Nothing to reconcile.");
        return Ok(JsonResponse::failure("Cart is empty."));
    };
    let order_id = item.id.parse::<OrderId>().map_err(|e| {
        warn!("💳️ {e}");
        ServerError::InvalidOrderKey(item.id.clone())
    })?;
    match api.confirm_payment(order_id).await {
        Ok(order) => {
            info!("💳️ Order {} payment confirmed. Status is now {}.", order.id, order.payment_status);
            Ok(JsonResponse::success("Order payment confirmed."))
        },
        Err(OrderFlowError::OrderNotFound(id)) => Err(ServerError::OrderNotFound(id)),
        Err(OrderFlowError::PaymentPreviouslyFailed(id)) => {
            warn!("💳️ A payment-success event arrived for order {id}, whose payment previously failed.");
            Ok(JsonResponse::failure(format!("Payment for order {id} previously failed.")))
        },
        Err(OrderFlowError::DatabaseError(e)) => {
            warn!("💳️ Could not confirm payment for order {order_id}. {e}");
            Ok(JsonResponse::failure("Could not confirm the payment."))
        },
    }
}
