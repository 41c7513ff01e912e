//! Outbound integrations: the Stripe customer lookup, the FCM push transport, the Firebase status mirror, and the
//! event-handler wiring that connects payment-completed events to the fulfillment fan-out.
pub mod fcm;
pub mod firebase;
pub mod fulfillment;
pub mod stripe;
