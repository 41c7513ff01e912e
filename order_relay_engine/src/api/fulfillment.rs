use log::*;
use thiserror::Error;

use crate::{
    db_types::{NotificationPayload, Order, OrderId, OrderStatus, User},
    traits::{FulfillmentLookup, NotificationTransport, RelayDbError, StatusMirror},
};

const CUSTOMER_TITLE: &str = "🥡 Your Order Placed Successfully";
const OWNER_TITLE: &str = "🥡 Incoming Order";

/// `FulfillmentApi` performs the best-effort side effects that follow a completed payment: mirroring the order
/// status for live tracking and notifying the customer and the restaurant owner.
///
/// Nothing in here can fail the pipeline. Every collaborator error and every broken lookup link is logged at the
/// point it short-circuits, and the remaining branches carry on independently.
#[derive(Clone)]
pub struct FulfillmentApi<B, N, M> {
    db: B,
    notifier: N,
    mirror: M,
}

#[derive(Debug, Clone, Error)]
enum FanOutError {
    #[error("order {0} has no line items")]
    NoLineItems(OrderId),
    #[error("food {0} is not in the database")]
    MissingFood(i64),
    #[error("food {0} has no images to use as a thumbnail")]
    MissingImage(i64),
    #[error("database error: {0}")]
    Database(#[from] RelayDbError),
}

impl<B, N, M> FulfillmentApi<B, N, M> {
    pub fn new(db: B, notifier: N, mirror: M) -> Self {
        Self { db, notifier, mirror }
    }
}

impl<B, N, M> FulfillmentApi<B, N, M>
where
    B: FulfillmentLookup,
    N: NotificationTransport,
    M: StatusMirror,
{
    /// Fans a freshly paid order out to its audiences.
    ///
    /// 1. Mirror the order into the live-tracking store as `Placed`.
    /// 2. Build the shared notification payload (first line item → food → first image).
    /// 3. Notify the customer, then the restaurant owner, each branch on its own.
    ///
    /// A re-delivered payment event reaches this method again and re-notifies; dispatch is not deduplicated.
    pub async fn fan_out(&self, order: &Order) {
        if let Err(e) = self.mirror.propagate(order, OrderStatus::Placed).await {
            warn!("🔔️ Could not mirror status for order {}. {e}", order.id);
        }
        let payload = match self.notification_payload(order).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("🔔️ Notification fan-out for order {} stopped early: {e}", order.id);
                return;
            },
        };
        self.notify_customer(order, &payload).await;
        self.notify_owner(order, &payload).await;
    }

    /// Walks order → first line item → food → first image. Only the first item's image is used as the thumbnail;
    /// carts spanning several foods are summarized by whatever was added first.
    async fn notification_payload(&self, order: &Order) -> Result<NotificationPayload, FanOutError> {
        let items = self.db.fetch_order_items(order.id).await?;
        let first = items.first().ok_or(FanOutError::NoLineItems(order.id))?;
        let food =
            self.db.fetch_food_by_id(first.food_id).await?.ok_or(FanOutError::MissingFood(first.food_id))?;
        let image_url = food.image_urls.first().cloned().ok_or(FanOutError::MissingImage(food.id))?;
        Ok(NotificationPayload::order(order.id, image_url))
    }

    async fn notify_customer(&self, order: &Order, payload: &NotificationPayload) {
        let user = match self.db.fetch_user_by_id(order.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("🔔️ Order {} references user {}, who is not in the database.", order.id, order.user_id);
                return;
            },
            Err(e) => {
                warn!("🔔️ Could not load the customer for order {}. {e}", order.id);
                return;
            },
        };
        let Some(token) = deliverable_token(&user) else {
            debug!("🔔️ Customer {} has no registered device. Skipping their notification.", user.id);
            return;
        };
        let body = format!(
            "Please wait patiently, you will be updated on your order: {} as soon as there is an update, 🙏",
            order.id
        );
        match self.notifier.send(token, CUSTOMER_TITLE, payload, &body).await {
            Ok(()) => info!("🔔️ Customer notified that order {} was placed.", order.id),
            Err(e) => warn!("🔔️ Could not notify the customer for order {}. {e}", order.id),
        }
    }

    async fn notify_owner(&self, order: &Order, payload: &NotificationPayload) {
        let restaurant = match self.db.fetch_restaurant_by_id(order.restaurant_id).await {
            Ok(Some(restaurant)) => restaurant,
            Ok(None) => {
                warn!(
                    "🔔️ Order {} references restaurant {}, which is not in the database.",
                    order.id, order.restaurant_id
                );
                return;
            },
            Err(e) => {
                warn!("🔔️ Could not load the restaurant for order {}. {e}", order.id);
                return;
            },
        };
        let owner = match self.db.fetch_user_by_id(restaurant.owner_id).await {
            Ok(Some(owner)) => owner,
            Ok(None) => {
                warn!(
                    "🔔️ Restaurant {} references owner {}, who is not in the database.",
                    restaurant.id, restaurant.owner_id
                );
                return;
            },
            Err(e) => {
                warn!("🔔️ Could not load the owner of restaurant {}. {e}", restaurant.id);
                return;
            },
        };
        let Some(token) = deliverable_token(&owner) else {
            debug!("🔔️ Owner of restaurant {} has no registered device. Skipping their notification.", restaurant.id);
            return;
        };
        let body = format!("You have a new order: {}. Please process the order 🙏", order.id);
        match self.notifier.send(token, OWNER_TITLE, payload, &body).await {
            Ok(()) => info!("🔔️ Restaurant owner notified of incoming order {}.", order.id),
            Err(e) => warn!("🔔️ Could not notify the restaurant owner for order {}. {e}", order.id),
        }
    }
}

/// A token is deliverable when it is present and not the `"none"` sentinel clients write on logout.
fn deliverable_token(user: &User) -> Option<&str> {
    user.fcm_token.as_deref().filter(|t| *t != "none")
}
