use thiserror::Error;

use crate::db_types::{Order, OrderStatus};

#[derive(Debug, Clone, Error)]
pub enum StatusMirrorError {
    #[error("Could not reach the status mirror: {0}")]
    Transport(String),
    #[error("Status mirror rejected the update. Error {status}. {message}")]
    Rejected { status: u16, message: String },
}

/// Mirrors an order's fulfillment status into the secondary real-time store that live-tracking UIs subscribe to.
/// The mirror is a cache, not a source of truth; failures are logged and the pipeline moves on.
#[allow(async_fn_in_trait)]
pub trait StatusMirror {
    async fn propagate(&self, order: &Order, status: OrderStatus) -> Result<(), StatusMirrorError>;
}
