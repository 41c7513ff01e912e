//! # Order relay server
//! This module hosts the server code for the order fulfillment relay. It is responsible for:
//! Listening for incoming webhook requests from Stripe.
//! Verifying the webhook signature and extracting the checkout information.
//! Reconciling the paid order in the database and fanning the result out to subscribers.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/webhook`: The webhook route for receiving payment events from Stripe.

pub mod config;
pub mod data_objects;
pub mod errors;

pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
