use crate::{
    db_types::{Food, OrderId, OrderItem, Restaurant, User},
    traits::RelayDbError,
};

/// Read-only projections used by the fulfillment fan-out: the dependent chain
/// order → items → food, order → user, and order → restaurant → owner.
#[allow(async_fn_in_trait)]
pub trait FulfillmentLookup {
    /// The line items of an order, in insertion order. The first item's food supplies the notification thumbnail.
    async fn fetch_order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RelayDbError>;

    async fn fetch_user_by_id(&self, id: i64) -> Result<Option<User>, RelayDbError>;

    async fn fetch_food_by_id(&self, id: i64) -> Result<Option<Food>, RelayDbError>;

    async fn fetch_restaurant_by_id(&self, id: i64) -> Result<Option<Restaurant>, RelayDbError>;
}
