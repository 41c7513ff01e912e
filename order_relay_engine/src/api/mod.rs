//! The relay's public APIs.
//!
//! The pattern for using them is the same as everywhere else in the workspace: construct an API instance over a
//! backend that implements the required traits. [`OrderFlowApi`] needs a [`crate::traits::RelayDatabase`];
//! [`FulfillmentApi`] needs a [`crate::traits::FulfillmentLookup`] plus the two outbound collaborators.

mod errors;
mod fulfillment;
mod order_flow;

pub use errors::OrderFlowError;
pub use fulfillment::FulfillmentApi;
pub use order_flow::OrderFlowApi;
