use std::time::Duration;

use log::*;
use order_relay_engine::{
    db_types::{Order, OrderStatus},
    traits::{StatusMirror, StatusMirrorError},
};
use reqwest::Client;
use serde_json::json;

use crate::config::FirebaseConfig;

/// Mirrors order statuses into a Firebase Realtime Database so that live-tracking clients can subscribe to
/// `restaurants/{restaurant_id}/orders/{order_id}` without polling the relay.
#[derive(Debug, Clone)]
pub struct FirebaseMirror {
    base_url: String,
    client: Client,
}

impl FirebaseMirror {
    pub fn new(config: FirebaseConfig, timeout: Duration) -> Result<Self, StatusMirrorError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| StatusMirrorError::Transport(e.to_string()))?;
        let base_url = config.database_url.trim_end_matches('/').to_string();
        Ok(Self { base_url, client })
    }
}

impl StatusMirror for FirebaseMirror {
    async fn propagate(&self, order: &Order, status: OrderStatus) -> Result<(), StatusMirrorError> {
        let url = format!("{}/restaurants/{}/orders/{}.json", self.base_url, order.restaurant_id, order.id.0);
        let body = json!({ "orderId": order.id.0, "orderStatus": status });
        trace!("🔔️ PUT {url}");
        let response =
            self.client.put(&url).json(&body).send().await.map_err(|e| StatusMirrorError::Transport(e.to_string()))?;
        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_else(|e| e.to_string());
            Err(StatusMirrorError::Rejected { status, message })
        }
    }
}
