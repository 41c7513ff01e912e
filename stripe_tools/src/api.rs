use std::time::Duration;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::de::DeserializeOwned;

use crate::{config::StripeConfig, data_objects::Customer, error::StripeApiError};

#[derive(Clone)]
pub struct StripeApi {
    config: StripeConfig,
    client: Client,
}

impl StripeApi {
    pub fn new(config: StripeConfig, timeout: Duration) -> Result<Self, StripeApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        let bearer = format!("Bearer {}", config.secret_key.reveal());
        let mut val = HeaderValue::from_str(&bearer).map_err(|e| StripeApiError::Initialization(e.to_string()))?;
        val.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, val);
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| StripeApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, StripeApiError> {
        let url = format!("{}{path}", self.config.api_url);
        trace!("Sending REST query: {url}");
        let response = self.client.get(url).send().await.map_err(|e| StripeApiError::ResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| StripeApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| StripeApiError::ResponseError(e.to_string()))?;
            Err(StripeApiError::QueryError { status, message })
        }
    }

    /// Fetches the full customer record for the given id. The relay calls this to recover the cart metadata attached
    /// during checkout initiation.
    pub async fn retrieve_customer(&self, customer_id: &str) -> Result<Customer, StripeApiError> {
        self.get(&format!("/v1/customers/{customer_id}")).await
    }
}
