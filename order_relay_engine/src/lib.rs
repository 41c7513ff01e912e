//! Order Relay Engine
//!
//! Core logic for the order fulfillment relay: the persisted order/user/food/restaurant records, the backend traits
//! a database must implement, the SQLite implementation of those traits, and the two pipeline APIs that the webhook
//! server drives:
//!
//! 1. [`OrderFlowApi`] — reconciles a confirmed payment against a persisted order: looks the order up by key,
//!    applies the (idempotent) `Pending → Completed` payment transition, and publishes a
//!    [`events::PaymentCompletedEvent`] for subscribers.
//! 2. [`FulfillmentApi`] — reacts to a completed payment with best-effort side effects: mirroring the order status
//!    into the live-tracking store and pushing notifications to the customer and the restaurant owner.
//!
//! The [`events`] module provides the stateless pub-sub machinery that connects the two without coupling the webhook
//! response path to notification latency.

mod api;
pub mod db_types;
pub mod events;
mod sqlite;
pub mod traits;

pub mod test_utils;

pub use api::{FulfillmentApi, OrderFlowApi, OrderFlowError};
pub use sqlite::SqliteDatabase;
