use std::fmt::Debug;

use log::*;

use crate::{
    api::OrderFlowError,
    db_types::{Order, OrderId},
    events::{EventProducers, PaymentCompletedEvent},
    traits::RelayDatabase,
};

/// `OrderFlowApi` reconciles verified payment events against persisted orders.
///
/// Its single operation is the `Pending → Completed` payment transition. The transition is idempotent and tolerant
/// of webhook re-delivery; see [`RelayDatabase::mark_payment_completed`] for the exact write semantics.
pub struct OrderFlowApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> OrderFlowApi<B>
where B: RelayDatabase
{
    /// Marks the payment for `order_id` as completed and notifies payment-completed subscribers.
    ///
    /// Re-running this for an order that is already `Completed` succeeds and re-notifies — webhook re-delivery is
    /// normal, and subscribers are documented as at-least-once. An order whose payment previously failed is not
    /// resurrected.
    pub async fn confirm_payment(&self, order_id: OrderId) -> Result<Order, OrderFlowError> {
        trace!("🔄️💳️ Confirming payment for order {order_id}");
        match self.db.mark_payment_completed(order_id).await? {
            Some(order) => {
                debug!("🔄️💳️ Order {order_id} payment is {}. Notifying subscribers.", order.payment_status);
                self.call_payment_completed_hook(&order).await;
                Ok(order)
            },
            // The conditional write missed: either the order is absent, or its payment already failed.
            None => match self.db.fetch_order_by_id(order_id).await? {
                Some(order) => {
                    warn!(
                        "🔄️💳️ A payment-success event arrived for order {order_id}, but its payment status is {}. \
                         Leaving the order untouched.",
                        order.payment_status
                    );
                    Err(OrderFlowError::PaymentPreviouslyFailed(order_id))
                },
                None => {
                    info!("🔄️💳️ A payment-success event referenced order {order_id}, which is not in the database.");
                    Err(OrderFlowError::OrderNotFound(order_id))
                },
            },
        }
    }

    async fn call_payment_completed_hook(&self, order: &Order) {
        for producer in &self.producers.payment_completed_producer {
            trace!("🔄️💳️ Publishing payment-completed event for order {}", order.id);
            producer.publish_event(PaymentCompletedEvent::new(order.clone())).await;
        }
    }
}
