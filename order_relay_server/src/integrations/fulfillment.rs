use std::time::Duration;

use log::*;
use order_relay_engine::{events::EventHandlers, FulfillmentApi, SqliteDatabase};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::{fcm::FcmTransport, firebase::FirebaseMirror},
};

pub const FULFILLMENT_EVENT_BUFFER_SIZE: usize = 25;

/// Wires the fulfillment fan-out to payment-completed events.
///
/// A completed payment is acknowledged to Stripe as soon as the database transition commits; the fan-out (status
/// mirror plus push notifications) runs on the event handler task, so outbound latency never backs up into the
/// webhook response.
pub fn create_fulfillment_event_handlers(
    db: SqliteDatabase,
    config: &ServerConfig,
) -> Result<EventHandlers, ServerError> {
    let timeout = Duration::from_secs(config.call_timeout_secs);
    let notifier = FcmTransport::new(config.fcm.clone(), timeout)
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let mirror = FirebaseMirror::new(config.firebase.clone(), timeout)
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let api = FulfillmentApi::new(db, notifier, mirror);
    let handlers = EventHandlers::on_payment_completed(FULFILLMENT_EVENT_BUFFER_SIZE, move |ev| {
        let api = api.clone();
        let order = ev.order;
        debug!("🔔️ Payment for order {} is complete. Starting fulfillment fan-out.", order.id);
        Box::pin(async move {
            api.fan_out(&order).await;
        })
    });
    Ok(handlers)
}
