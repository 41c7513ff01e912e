use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use ofr_common::Money;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, Type};
use thiserror::Error;

//--------------------------------------        OrderId        -------------------------------------------------------
/// The native order key. Payment-provider metadata carries order identifiers as strings; coercing one into an
/// `OrderId` is the gate that rejects stale or adversarial keys before they reach the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct OrderId(pub i64);

#[derive(Debug, Clone, Error)]
#[error("'{0}' is not a well-formed order key")]
pub struct InvalidOrderId(pub String);

impl FromStr for OrderId {
    type Err = InvalidOrderId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self).map_err(|_| InvalidOrderId(s.to_string()))
    }
}

impl From<i64> for OrderId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//--------------------------------------     PaymentStatus     -------------------------------------------------------
/// Payment state of an order. The only transitions are `Pending → Completed` and `Pending → Failed`; neither
/// terminal state ever reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::Completed => write!(f, "Completed"),
            PaymentStatus::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid status value: {0}")]
pub struct StatusConversionError(String);

impl FromStr for PaymentStatus {
    type Err = StatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Completed" => Ok(Self::Completed),
            "Failed" => Ok(Self::Failed),
            s => Err(StatusConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

//--------------------------------------      OrderStatus      -------------------------------------------------------
/// Fulfillment state of an order. The relay only ever asserts `Placed`; later transitions are driven by the delivery
/// flow, which is outside this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatus {
    Placed,
    Preparing,
    #[sqlx(rename = "Out for Delivery")]
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Placed => write!(f, "Placed"),
            OrderStatus::Preparing => write!(f, "Preparing"),
            OrderStatus::OutForDelivery => write!(f, "Out for Delivery"),
            OrderStatus::Delivered => write!(f, "Delivered"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = StatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Placed" => Ok(Self::Placed),
            "Preparing" => Ok(Self::Preparing),
            "Out for Delivery" => Ok(Self::OutForDelivery),
            "Delivered" => Ok(Self::Delivered),
            s => Err(StatusConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

//--------------------------------------        Order        ---------------------------------------------------------
/// A persisted order. Created by the checkout-initiation flow (outside this system) in `Pending` payment state;
/// the relay's only mutation is the payment-status transition.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: i64,
    pub restaurant_id: i64,
    pub driver_id: Option<i64>,
    pub delivery_address_id: i64,
    pub order_total: Money,
    pub delivery_fee: Money,
    pub grand_total: Money,
    pub payment_method: Option<String>,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub rating: Option<i64>,
    pub feedback: Option<String>,
    pub promo_code: Option<String>,
    pub discount_amount: Option<Money>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      OrderItem      ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: OrderId,
    pub food_id: i64,
    pub quantity: i64,
    pub price: Money,
    /// Selected add-ons, stored as a JSON array.
    pub additives: Json<Vec<String>>,
    pub instructions: String,
}

//--------------------------------------        User         ---------------------------------------------------------
/// A customer or restaurant-owner account. Read-only from the relay's perspective.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Push-notification device token. `None` means no token was ever registered; the literal string `"none"` is a
    /// sentinel written by clients on logout. Both suppress delivery.
    pub fcm_token: Option<String>,
}

//--------------------------------------        Food         ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Food {
    pub id: i64,
    pub title: String,
    pub restaurant_id: i64,
    /// Display images, stored as a JSON array of urls. The first entry serves as the notification thumbnail.
    pub image_urls: Json<Vec<String>>,
}

//--------------------------------------     Restaurant      ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Restaurant {
    pub id: i64,
    pub title: String,
    /// The owning [`User`], who receives incoming-order notifications.
    pub owner_id: i64,
}

//--------------------------------------  NotificationPayload  -------------------------------------------------------
/// The structured data block attached to both the customer and owner push messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub order_id: OrderId,
    pub image_url: String,
    pub message_type: String,
}

impl NotificationPayload {
    /// Payload for an order-lifecycle message, thumbnailed with the given image.
    pub fn order(order_id: OrderId, image_url: String) -> Self {
        Self { order_id, image_url, message_type: "order".to_string() }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn order_id_parses_numeric_keys() {
        assert_eq!("42".parse::<OrderId>().unwrap(), OrderId(42));
        assert_eq!(" 7 ".parse::<OrderId>().unwrap(), OrderId(7));
    }

    #[test]
    fn order_id_rejects_malformed_keys() {
        assert!("65ab03f1f2c1e9".parse::<OrderId>().is_err());
        assert!("".parse::<OrderId>().is_err());
        assert!("12.5".parse::<OrderId>().is_err());
    }

    #[test]
    fn status_round_trips() {
        for s in [PaymentStatus::Pending, PaymentStatus::Completed, PaymentStatus::Failed] {
            assert_eq!(s.to_string().parse::<PaymentStatus>().unwrap(), s);
        }
        for s in
            [OrderStatus::Placed, OrderStatus::Preparing, OrderStatus::OutForDelivery, OrderStatus::Delivered]
        {
            assert_eq!(s.to_string().parse::<OrderStatus>().unwrap(), s);
        }
        assert_eq!(OrderStatus::OutForDelivery.to_string(), "Out for Delivery");
    }

    #[test]
    fn notification_payload_serializes_in_wire_form() {
        let payload = NotificationPayload::order(OrderId(9), "https://img/1.png".to_string());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["orderId"], 9);
        assert_eq!(json["imageUrl"], "https://img/1.png");
        assert_eq!(json["messageType"], "order");
    }
}
