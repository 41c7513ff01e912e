//! Webhook signature verification.
//!
//! Stripe signs each webhook delivery with an HMAC over the exact request bytes. The signature arrives in the
//! `Stripe-Signature` header as `t=<unix seconds>,v1=<hex hmac>[,v1=...]`, where the MAC is computed over
//! `"{t}.{body}"` with the endpoint's webhook secret. Verification must happen on the raw body, before any parsing,
//! and a failure means the request is rejected outright — the provider retries on its own schedule.

use chrono::Utc;
use hmac::{Hmac, Mac};
use log::*;
use sha2::Sha256;

use crate::{config::StripeConfig, data_objects::Event, error::WebhookError};

pub const STRIPE_SIGNATURE_HEADER: &str = "Stripe-Signature";

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct EventVerifier {
    config: StripeConfig,
}

impl EventVerifier {
    pub fn new(config: StripeConfig) -> Self {
        Self { config }
    }

    /// Validates `signature_header` against the raw `payload` and, on success, parses the payload into a typed
    /// [`Event`]. The payload is never inspected before the signature checks out.
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<Event, WebhookError> {
        let (timestamp, signatures) = parse_signature_header(signature_header)?;
        let age = (Utc::now().timestamp() - timestamp).abs();
        if age > self.config.signature_tolerance_secs {
            warn!("🔐️ Webhook timestamp is {age}s old, outside the {}s tolerance.", self.config.signature_tolerance_secs);
            return Err(WebhookError::StaleTimestamp);
        }
        let expected = sign_payload(self.config.webhook_secret.reveal(), timestamp, payload);
        if !signatures.iter().any(|sig| constant_time_eq(sig, &expected)) {
            return Err(WebhookError::SignatureMismatch);
        }
        trace!("🔐️ Webhook signature verified");
        Event::from_payload(payload)
    }
}

/// Computes the hex-encoded HMAC-SHA256 signature for a payload, as Stripe would. Also used by tests to sign
/// synthetic deliveries.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

fn parse_signature_header(header: &str) -> Result<(i64, Vec<&str>), WebhookError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        let mut kv = part.trim().splitn(2, '=');
        match (kv.next(), kv.next()) {
            (Some("t"), Some(v)) => {
                timestamp =
                    Some(v.parse::<i64>().map_err(|e| WebhookError::MalformedHeader(format!("t={v}: {e}")))?);
            },
            (Some("v1"), Some(v)) => signatures.push(v),
            // Stripe includes scheme versions we don't know about (e.g. v0); ignore them.
            _ => {},
        }
    }
    let timestamp = timestamp.ok_or(WebhookError::MissingTimestamp)?;
    if signatures.is_empty() {
        return Err(WebhookError::MissingSignature);
    }
    Ok((timestamp, signatures))
}

// Comparison that does not leak the match position through timing.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod test {
    use ofr_common::Secret;

    use super::*;

    const SECRET: &str = "whsec_test_secret";
    const PAYLOAD: &[u8] = br#"{"id":"evt_1","type":"checkout.session.completed","data":{"object":{"id":"cs_1","customer":"cus_42"}}}"#;

    fn verifier() -> EventVerifier {
        let config = StripeConfig { webhook_secret: Secret::new(SECRET.to_string()), ..Default::default() };
        EventVerifier::new(config)
    }

    fn signed_header(secret: &str, timestamp: i64, payload: &[u8]) -> String {
        format!("t={timestamp},v1={}", sign_payload(secret, timestamp, payload))
    }

    #[test]
    fn accepts_a_valid_signature() {
        let _ = env_logger::try_init();
        let header = signed_header(SECRET, Utc::now().timestamp(), PAYLOAD);
        let event = verifier().verify(PAYLOAD, &header).unwrap();
        assert!(matches!(event, Event::CheckoutSessionCompleted(_)));
    }

    #[test]
    fn rejects_a_tampered_payload() {
        let header = signed_header(SECRET, Utc::now().timestamp(), PAYLOAD);
        let tampered = PAYLOAD.to_vec().iter().map(|b| b ^ 1).collect::<Vec<_>>();
        assert!(matches!(verifier().verify(&tampered, &header), Err(WebhookError::SignatureMismatch)));
    }

    #[test]
    fn rejects_the_wrong_secret() {
        let header = signed_header("whsec_other", Utc::now().timestamp(), PAYLOAD);
        assert!(matches!(verifier().verify(PAYLOAD, &header), Err(WebhookError::SignatureMismatch)));
    }

    #[test]
    fn rejects_a_stale_timestamp() {
        let old = Utc::now().timestamp() - 3600;
        let header = signed_header(SECRET, old, PAYLOAD);
        assert!(matches!(verifier().verify(PAYLOAD, &header), Err(WebhookError::StaleTimestamp)));
    }

    #[test]
    fn rejects_a_header_without_signatures() {
        let header = format!("t={}", Utc::now().timestamp());
        assert!(matches!(verifier().verify(PAYLOAD, &header), Err(WebhookError::MissingSignature)));
    }

    #[test]
    fn rejects_a_header_without_a_timestamp() {
        assert!(matches!(verifier().verify(PAYLOAD, "v1=deadbeef"), Err(WebhookError::MissingTimestamp)));
    }

    #[test]
    fn rejects_garbage_in_the_timestamp() {
        assert!(matches!(verifier().verify(PAYLOAD, "t=yesterday,v1=deadbeef"), Err(WebhookError::MalformedHeader(_))));
    }

    #[test]
    fn accepts_any_of_several_v1_signatures() {
        let ts = Utc::now().timestamp();
        let good = sign_payload(SECRET, ts, PAYLOAD);
        let header = format!("t={ts},v1=0000,v1={good}");
        assert!(verifier().verify(PAYLOAD, &header).is_ok());
    }
}
