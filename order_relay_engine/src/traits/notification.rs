use thiserror::Error;

use crate::db_types::NotificationPayload;

#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Could not reach the notification service: {0}")]
    Transport(String),
    #[error("Notification rejected. Error {status}. {message}")]
    Rejected { status: u16, message: String },
}

/// Delivers a push message to a single device. Delivery is best-effort: the fan-out step audits the returned
/// `Result` in the logs but never propagates it.
#[allow(async_fn_in_trait)]
pub trait NotificationTransport {
    async fn send(
        &self,
        device_token: &str,
        title: &str,
        payload: &NotificationPayload,
        body: &str,
    ) -> Result<(), NotificationError>;
}
