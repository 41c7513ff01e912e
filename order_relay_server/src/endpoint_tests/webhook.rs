use std::collections::HashMap;

use actix_web::http::StatusCode;
use chrono::Utc;
use ofr_common::Money;
use order_relay_engine::db_types::{Order, OrderId, OrderStatus, PaymentStatus};
use stripe_tools::Customer;

use super::{
    helpers::{post_webhook, signature_header, TEST_WEBHOOK_SECRET},
    mocks::{MockRelayDb, MockResolver},
};

const CHECKOUT_BODY: &str =
    r#"{"type":"checkout.session.completed","data":{"object":{"id":"cs_1","customer":"cus_9"}}}"#;

fn order(status: PaymentStatus) -> Order {
    Order {
        id: OrderId(42),
        user_id: 1,
        restaurant_id: 7,
        driver_id: None,
        delivery_address_id: 3,
        order_total: Money::from_cents(1250),
        delivery_fee: Money::from_cents(0),
        grand_total: Money::from_cents(1250),
        payment_method: Some("card".to_string()),
        payment_status: status,
        order_status: OrderStatus::Placed,
        rating: None,
        feedback: None,
        promo_code: None,
        discount_amount: None,
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn customer_with_cart(cart: &str) -> Customer {
    let mut metadata = HashMap::new();
    metadata.insert("cart".to_string(), cart.to_string());
    Customer { id: "cus_9".to_string(), metadata }
}

fn signed(body: &str) -> Option<String> {
    Some(signature_header(TEST_WEBHOOK_SECRET, body.as_bytes()))
}

#[actix_web::test]
async fn missing_signature_header_is_rejected() {
    // Empty mocks: any backend call panics the test.
    let (status, body) =
        post_webhook(MockRelayDb::new(), MockResolver::new(), None, CHECKOUT_BODY).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("signature header is missing"), "unexpected body: {body}");
}

#[actix_web::test]
async fn invalid_signature_is_rejected() {
    let sig = Some(signature_header("whsec_wrong_secret", CHECKOUT_BODY.as_bytes()));
    let (status, body) = post_webhook(MockRelayDb::new(), MockResolver::new(), sig, CHECKOUT_BODY).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("signature is invalid"), "unexpected body: {body}");
}

#[actix_web::test]
async fn signed_but_malformed_payload_is_reported_as_malformed() {
    let body = r#"{"type":42,"data":"nope"}"#;
    let (status, res) = post_webhook(MockRelayDb::new(), MockResolver::new(), signed(body), body).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(res.contains("payload is malformed"), "unexpected body: {res}");
    assert!(!res.contains("signature is invalid"), "unexpected body: {res}");
}

#[actix_web::test]
async fn unknown_event_types_are_acknowledged() {
    let body = r#"{"type":"charge.refunded","data":{"object":{}}}"#;
    let (status, res) = post_webhook(MockRelayDb::new(), MockResolver::new(), signed(body), body).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(res.contains(r#""success":true"#), "unexpected body: {res}");
    assert!(res.contains("charge.refunded"), "unexpected body: {res}");
}

#[actix_web::test]
async fn payment_intent_success_is_acknowledged_without_action() {
    let body = r#"{"type":"payment_intent.succeeded","data":{"object":{"id":"pi_1","amount":1250}}}"#;
    let (status, res) = post_webhook(MockRelayDb::new(), MockResolver::new(), signed(body), body).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(res.contains(r#""success":true"#), "unexpected body: {res}");
}

#[actix_web::test]
async fn completed_checkout_confirms_the_order() {
    let mut resolver = MockResolver::new();
    resolver.expect_resolve_customer().withf(|id| id == "cus_9").returning(|_| {
        Ok(customer_with_cart(r#"[{"name":"Burger","id":"42","price":12.5,"quantity":1,"restaurantId":"7"}]"#))
    });
    let mut db = MockRelayDb::new();
    db.expect_mark_payment_completed()
        .withf(|id| *id == OrderId(42))
        .times(1)
        .returning(|_| Ok(Some(order(PaymentStatus::Completed))));
    let (status, res) = post_webhook(db, resolver, signed(CHECKOUT_BODY), CHECKOUT_BODY).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(res.contains(r#""success":true"#), "unexpected body: {res}");
}

#[actix_web::test]
async fn checkout_for_an_unknown_order_returns_not_found() {
    let mut resolver = MockResolver::new();
    resolver.expect_resolve_customer().returning(|_| {
        Ok(customer_with_cart(r#"[{"name":"Burger","id":"42","price":12.5,"quantity":1,"restaurantId":"7"}]"#))
    });
    let mut db = MockRelayDb::new();
    db.expect_mark_payment_completed().returning(|_| Ok(None));
    db.expect_fetch_order_by_id().returning(|_| Ok(None));
    let (status, res) = post_webhook(db, resolver, signed(CHECKOUT_BODY), CHECKOUT_BODY).await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(res.contains("was not found"), "unexpected body: {res}");
}

#[actix_web::test]
async fn checkout_for_a_failed_payment_is_acknowledged_with_failure() {
    let mut resolver = MockResolver::new();
    resolver.expect_resolve_customer().returning(|_| {
        Ok(customer_with_cart(r#"[{"name":"Burger","id":"42","price":12.5,"quantity":1,"restaurantId":"7"}]"#))
    });
    let mut db = MockRelayDb::new();
    db.expect_mark_payment_completed().returning(|_| Ok(None));
    db.expect_fetch_order_by_id().returning(|_| Ok(Some(order(PaymentStatus::Failed))));
    let (status, res) = post_webhook(db, resolver, signed(CHECKOUT_BODY), CHECKOUT_BODY).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(res.contains(r#""success":false"#), "unexpected body: {res}");
}

#[actix_web::test]
async fn malformed_cart_is_acknowledged_with_failure() {
    let mut resolver = MockResolver::new();
    resolver.expect_resolve_customer().returning(|_| Ok(customer_with_cart("this is not json")));
    // No db calls expected.
    let (status, res) =
        post_webhook(MockRelayDb::new(), resolver, signed(CHECKOUT_BODY), CHECKOUT_BODY).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(res.contains(r#""success":false"#), "unexpected body: {res}");
}

#[actix_web::test]
async fn empty_cart_is_acknowledged_with_failure() {
    let mut resolver = MockResolver::new();
    resolver.expect_resolve_customer().returning(|_| Ok(customer_with_cart("[]")));
    let (status, res) =
        post_webhook(MockRelayDb::new(), resolver, signed(CHECKOUT_BODY), CHECKOUT_BODY).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(res.contains(r#""success":false"#), "unexpected body: {res}");
}

#[actix_web::test]
async fn non_numeric_order_key_is_rejected() {
    let mut resolver = MockResolver::new();
    resolver.expect_resolve_customer().returning(|_| {
        Ok(customer_with_cart(r#"[{"name":"Burger","id":"abc","price":12.5,"quantity":1,"restaurantId":"7"}]"#))
    });
    let (status, res) =
        post_webhook(MockRelayDb::new(), resolver, signed(CHECKOUT_BODY), CHECKOUT_BODY).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(res.contains("not a valid order key"), "unexpected body: {res}");
}

#[actix_web::test]
async fn checkout_without_a_customer_is_acknowledged_with_failure() {
    let body = r#"{"type":"checkout.session.completed","data":{"object":{"id":"cs_1","customer":null}}}"#;
    let (status, res) = post_webhook(MockRelayDb::new(), MockResolver::new(), signed(body), body).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(res.contains(r#""success":false"#), "unexpected body: {res}");
}
