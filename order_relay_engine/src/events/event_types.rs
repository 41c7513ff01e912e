use crate::db_types::Order;

/// Emitted after an order's payment status has been transitioned to `Completed`.
///
/// Re-delivered webhook events re-emit this (the transition is idempotent but emission is not deduplicated), so
/// subscribers must tolerate seeing the same order more than once.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentCompletedEvent {
    pub order: Order,
}

impl PaymentCompletedEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}
