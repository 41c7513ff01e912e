use log::*;
use ofr_common::Secret;

pub const DEFAULT_STRIPE_API_URL: &str = "https://api.stripe.com";
const DEFAULT_SIGNATURE_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Base url of the Stripe REST API. Overridable mainly so that tests can point at a local stub.
    pub api_url: String,
    pub secret_key: Secret<String>,
    pub webhook_secret: Secret<String>,
    /// Maximum age, in seconds, of the timestamp in a webhook signature header before the event is rejected.
    pub signature_tolerance_secs: i64,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_STRIPE_API_URL.to_string(),
            secret_key: Secret::default(),
            webhook_secret: Secret::default(),
            signature_tolerance_secs: DEFAULT_SIGNATURE_TOLERANCE_SECS,
        }
    }
}

impl StripeConfig {
    pub fn new_from_env_or_default() -> Self {
        let api_url = std::env::var("OFR_STRIPE_API_URL").unwrap_or_else(|_| DEFAULT_STRIPE_API_URL.to_string());
        let secret_key = Secret::new(std::env::var("OFR_STRIPE_SECRET_KEY").unwrap_or_else(|_| {
            warn!("OFR_STRIPE_SECRET_KEY not set. Customer lookups against the live API will fail.");
            String::default()
        }));
        let webhook_secret = Secret::new(std::env::var("OFR_STRIPE_WEBHOOK_SECRET").unwrap_or_else(|_| {
            warn!("OFR_STRIPE_WEBHOOK_SECRET not set. Incoming webhook signatures cannot be verified.");
            String::default()
        }));
        let signature_tolerance_secs = std::env::var("OFR_STRIPE_SIGNATURE_TOLERANCE")
            .ok()
            .and_then(|s| {
                s.parse::<i64>()
                    .map_err(|e| warn!("Invalid value for OFR_STRIPE_SIGNATURE_TOLERANCE: {e}. Using the default."))
                    .ok()
            })
            .unwrap_or(DEFAULT_SIGNATURE_TOLERANCE_SECS);
        Self { api_url, secret_key, webhook_secret, signature_tolerance_secs }
    }
}
