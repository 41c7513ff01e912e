use thiserror::Error;

use crate::{db_types::OrderId, traits::RelayDbError};

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Order {0} is not in the database")]
    OrderNotFound(OrderId),
    #[error("Payment for order {0} was previously marked as failed and cannot be completed")]
    PaymentPreviouslyFailed(OrderId),
    #[error("Database error: {0}")]
    DatabaseError(#[from] RelayDbError),
}
