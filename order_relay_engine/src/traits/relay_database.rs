use thiserror::Error;

use crate::{
    db_types::{Order, OrderId},
    traits::FulfillmentLookup,
};

#[derive(Debug, Clone, Error)]
pub enum RelayDbError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for RelayDbError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

/// The write-side contract of a relay backend.
#[allow(async_fn_in_trait)]
pub trait RelayDatabase: FulfillmentLookup {
    /// The URL of the database.
    fn url(&self) -> &str;

    /// Fetches the order record for the given key, if it exists.
    async fn fetch_order_by_id(&self, id: OrderId) -> Result<Option<Order>, RelayDbError>;

    /// Atomically marks the order's payment as `Completed` and returns the updated record.
    ///
    /// The transition is a single conditional write, not a read-modify-write: it applies when the current payment
    /// status is `Pending` (the genuine transition) or already `Completed` (a webhook re-delivery; the write is a
    /// no-op with the same end state). It deliberately does NOT apply to a `Failed` order — that state never
    /// reverses.
    ///
    /// Returns `None` when no row was transitioned, i.e. the order does not exist or its payment has failed.
    /// Callers disambiguate with [`RelayDatabase::fetch_order_by_id`].
    async fn mark_payment_completed(&self, id: OrderId) -> Result<Option<Order>, RelayDbError>;
}
