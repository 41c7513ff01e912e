use std::time::Duration;

use log::*;
use order_relay_engine::{
    db_types::NotificationPayload,
    traits::{NotificationError, NotificationTransport},
};
use reqwest::{
    header,
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde_json::json;

use crate::config::FcmConfig;

/// Push delivery over the FCM legacy HTTP API.
#[derive(Debug, Clone)]
pub struct FcmTransport {
    url: String,
    client: Client,
}

impl FcmTransport {
    pub fn new(config: FcmConfig, timeout: Duration) -> Result<Self, NotificationError> {
        let mut headers = HeaderMap::with_capacity(1);
        let auth = format!("key={}", config.server_key.reveal());
        let mut value = HeaderValue::from_str(&auth).map_err(|e| NotificationError::Transport(e.to_string()))?;
        value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, value);
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| NotificationError::Transport(e.to_string()))?;
        Ok(Self { url: config.api_url, client })
    }
}

impl NotificationTransport for FcmTransport {
    async fn send(
        &self,
        device_token: &str,
        title: &str,
        payload: &NotificationPayload,
        body: &str,
    ) -> Result<(), NotificationError> {
        let message = json!({
            "to": device_token,
            "notification": { "title": title, "body": body },
            "data": payload,
        });
        trace!("🔔️ POST {}", self.url);
        let response = self
            .client
            .post(&self.url)
            .json(&message)
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;
        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_else(|e| e.to_string());
            Err(NotificationError::Rejected { status, message })
        }
    }
}
