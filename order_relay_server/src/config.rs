//! Server configuration, read from environment variables with logged fallbacks.
use std::env;

use log::*;
use ofr_common::Secret;
use stripe_tools::StripeConfig;

const DEFAULT_OFR_HOST: &str = "127.0.0.1";
const DEFAULT_OFR_PORT: u16 = 8360;
const DEFAULT_FCM_API_URL: &str = "https://fcm.googleapis.com/fcm/send";
const DEFAULT_CALL_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// The timeout applied to every outbound HTTP call the relay makes (Stripe, FCM, the status mirror).
    pub call_timeout_secs: u64,
    pub stripe: StripeConfig,
    pub fcm: FcmConfig,
    pub firebase: FirebaseConfig,
}

/// Firebase Cloud Messaging configuration for push notifications.
#[derive(Clone, Debug, Default)]
pub struct FcmConfig {
    pub api_url: String,
    pub server_key: Secret<String>,
}

/// Configuration for the realtime database that mirrors order statuses for live tracking.
#[derive(Clone, Debug, Default)]
pub struct FirebaseConfig {
    pub database_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OFR_HOST.to_string(),
            port: DEFAULT_OFR_PORT,
            database_url: String::default(),
            call_timeout_secs: DEFAULT_CALL_TIMEOUT_SECS,
            stripe: StripeConfig::default(),
            fcm: FcmConfig::default(),
            firebase: FirebaseConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("OFR_HOST").ok().unwrap_or_else(|| DEFAULT_OFR_HOST.into());
        let port = env::var("OFR_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for OFR_PORT. {e} Using the default, {DEFAULT_OFR_PORT}, instead."
                    );
                    DEFAULT_OFR_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_OFR_PORT);
        let database_url = env::var("OFR_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ OFR_DATABASE_URL is not set. Please set it to the URL for the relay database.");
            String::default()
        });
        let call_timeout_secs = env::var("OFR_CALL_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_CALL_TIMEOUT_SECS);
        let stripe = StripeConfig::new_from_env_or_default();
        let fcm = FcmConfig::from_env_or_default();
        let firebase = FirebaseConfig::from_env_or_default();
        Self { host, port, database_url, call_timeout_secs, stripe, fcm, firebase }
    }
}

impl FcmConfig {
    pub fn from_env_or_default() -> Self {
        let api_url = env::var("OFR_FCM_API_URL").ok().unwrap_or_else(|| DEFAULT_FCM_API_URL.into());
        let server_key = env::var("OFR_FCM_SERVER_KEY").map(Secret::new).unwrap_or_else(|_| {
            warn!("🪛️ OFR_FCM_SERVER_KEY is not set. Push notifications will be rejected by FCM.");
            Secret::default()
        });
        Self { api_url, server_key }
    }
}

impl FirebaseConfig {
    pub fn from_env_or_default() -> Self {
        let database_url = env::var("OFR_FIREBASE_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ OFR_FIREBASE_DATABASE_URL is not set. Order statuses will not be mirrored for live tracking.");
            String::default()
        });
        Self { database_url }
    }
}
