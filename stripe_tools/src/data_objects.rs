use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CartError, WebhookError};

/// A verified provider event, keyed by its type tag.
///
/// Only the two event kinds the relay acts on are modelled explicitly. Everything else lands in the `Unknown`
/// variant, which keeps the raw type tag so the router can log it before acknowledging.
#[derive(Debug, Clone)]
pub enum Event {
    CheckoutSessionCompleted(CheckoutSession),
    PaymentIntentSucceeded(PaymentIntent),
    Unknown(String),
}

#[derive(Debug, Clone, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    event_type: String,
    data: RawEventData,
}

#[derive(Debug, Clone, Deserialize)]
struct RawEventData {
    object: serde_json::Value,
}

impl Event {
    /// Parses a raw (already signature-verified) webhook body into a typed event.
    pub fn from_payload(payload: &[u8]) -> Result<Self, WebhookError> {
        let raw: RawEvent = serde_json::from_slice(payload).map_err(|e| WebhookError::InvalidPayload(e.to_string()))?;
        let event = match raw.event_type.as_str() {
            "checkout.session.completed" => {
                let session = serde_json::from_value(raw.data.object)
                    .map_err(|e| WebhookError::InvalidPayload(e.to_string()))?;
                Event::CheckoutSessionCompleted(session)
            },
            "payment_intent.succeeded" => {
                let intent = serde_json::from_value(raw.data.object)
                    .map_err(|e| WebhookError::InvalidPayload(e.to_string()))?;
                Event::PaymentIntentSucceeded(intent)
            },
            _ => Event::Unknown(raw.event_type),
        };
        Ok(event)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Reference to the customer record on the provider. Absent when the session was created without one, in which
    /// case the order cannot be recovered and the event is acknowledged without action.
    pub customer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Customer {
    /// Deserializes the cart that checkout initiation stashed on this customer's metadata.
    ///
    /// The cart is a JSON string under the `cart` key: a sequence of [`CartItem`]s whose `id` fields carry the
    /// order identifier (an upstream contract, see [`CartItem::id`]).
    pub fn cart(&self) -> Result<Vec<CartItem>, CartError> {
        let raw = self.metadata.get("cart").ok_or(CartError::MissingCart)?;
        serde_json::from_str(raw).map_err(|e| CartError::Malformed(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    /// The identifier of the order this item belongs to. Checkout initiation writes the order key here when it
    /// creates the session, which is how a payment finds its way back to an order.
    pub id: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(rename = "restaurantId")]
    pub restaurant_id: String,
}

#[cfg(test)]
mod test {
    use super::*;

    fn customer_with_cart(cart: &str) -> Customer {
        let mut metadata = HashMap::new();
        metadata.insert("cart".to_string(), cart.to_string());
        Customer { id: "cus_123".to_string(), metadata }
    }

    #[test]
    fn parses_cart_metadata() {
        let customer = customer_with_cart(
            r#"[{"name":"Burger","id":"42","price":10.5,"quantity":1,"restaurantId":"7"}]"#,
        );
        let cart = customer.cart().unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].id, "42");
        assert_eq!(cart[0].restaurant_id, "7");
    }

    #[test]
    fn malformed_cart_is_an_error() {
        let customer = customer_with_cart("{not json");
        assert!(matches!(customer.cart(), Err(CartError::Malformed(_))));
    }

    #[test]
    fn missing_cart_is_an_error() {
        let customer = Customer { id: "cus_123".to_string(), metadata: HashMap::new() };
        assert!(matches!(customer.cart(), Err(CartError::MissingCart)));
    }

    #[test]
    fn unknown_event_type_keeps_the_tag() {
        let payload = br#"{"id":"evt_1","type":"invoice.finalized","data":{"object":{}}}"#;
        match Event::from_payload(payload).unwrap() {
            Event::Unknown(tag) => assert_eq!(tag, "invoice.finalized"),
            e => panic!("expected Unknown, got {e:?}"),
        }
    }

    #[test]
    fn parses_checkout_session_completed() {
        let payload = br#"{"id":"evt_2","type":"checkout.session.completed","data":{"object":{"id":"cs_1","customer":"cus_123"}}}"#;
        match Event::from_payload(payload).unwrap() {
            Event::CheckoutSessionCompleted(session) => {
                assert_eq!(session.id, "cs_1");
                assert_eq!(session.customer.as_deref(), Some("cus_123"));
            },
            e => panic!("expected CheckoutSessionCompleted, got {e:?}"),
        }
    }
}
