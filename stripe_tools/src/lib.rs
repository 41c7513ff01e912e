//! Stripe client support for the order fulfillment relay.
//!
//! This crate wraps the two slices of the Stripe surface that the relay consumes:
//! * Webhook event verification ([`EventVerifier`]): checking the `Stripe-Signature` header against the raw request
//!   body and producing a typed [`Event`].
//! * Customer retrieval ([`StripeApi`]): fetching the customer record whose metadata carries the serialized cart that
//!   links a checkout session back to an order.

mod api;
mod config;
mod error;
mod webhook;

mod data_objects;

pub use api::StripeApi;
pub use config::StripeConfig;
pub use data_objects::{CartItem, CheckoutSession, Customer, Event, PaymentIntent};
pub use error::{CartError, StripeApiError, WebhookError};
pub use webhook::{sign_payload, EventVerifier, STRIPE_SIGNATURE_HEADER};
