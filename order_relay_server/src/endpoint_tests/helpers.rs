use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web, App};
use chrono::Utc;
use ofr_common::Secret;
use order_relay_engine::{events::EventProducers, OrderFlowApi};
use stripe_tools::{sign_payload, EventVerifier, StripeConfig, STRIPE_SIGNATURE_HEADER};

use super::mocks::{MockRelayDb, MockResolver};
use crate::routes::StripeWebhookRoute;

pub const TEST_WEBHOOK_SECRET: &str = "whsec_test_secret";

pub fn test_stripe_config() -> StripeConfig {
    StripeConfig { webhook_secret: Secret::new(TEST_WEBHOOK_SECRET.to_string()), ..Default::default() }
}

/// Builds a `Stripe-Signature` header over `payload` with the given secret and a current timestamp.
pub fn signature_header(secret: &str, payload: &[u8]) -> String {
    let timestamp = Utc::now().timestamp();
    format!("t={timestamp},v1={}", sign_payload(secret, timestamp, payload))
}

/// Stands up the webhook route over the given mocks and posts `body` to it.
pub async fn post_webhook(
    db: MockRelayDb,
    resolver: MockResolver,
    signature: Option<String>,
    body: &'static str,
) -> Result<(StatusCode, String), String> {
    let verifier = EventVerifier::new(test_stripe_config());
    let api = OrderFlowApi::new(db, EventProducers::default());
    let app = App::new()
        .app_data(web::Data::new(verifier))
        .app_data(web::Data::new(resolver))
        .app_data(web::Data::new(api))
        .service(StripeWebhookRoute::<MockRelayDb, MockResolver>::new());
    let service = test::init_service(app).await;
    let mut req = TestRequest::post().uri("/webhook").set_payload(body);
    if let Some(sig) = signature {
        req = req.insert_header((STRIPE_SIGNATURE_HEADER, sig));
    }
    let req = req.to_request();
    let (_, res) = test::try_call_service(&service, req).await.map_err(|e| e.to_string())?.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    Ok((status, body))
}
