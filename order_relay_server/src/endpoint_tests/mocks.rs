use mockall::mock;
use order_relay_engine::{
    db_types::{Food, Order, OrderId, OrderItem, Restaurant, User},
    traits::{FulfillmentLookup, RelayDatabase, RelayDbError},
};
use stripe_tools::{Customer, StripeApiError};

use crate::integrations::stripe::CustomerResolver;

mock! {
    pub RelayDb {}
    impl RelayDatabase for RelayDb {
        fn url(&self) -> &str;
        async fn fetch_order_by_id(&self, id: OrderId) -> Result<Option<Order>, RelayDbError>;
        async fn mark_payment_completed(&self, id: OrderId) -> Result<Option<Order>, RelayDbError>;
    }
    impl FulfillmentLookup for RelayDb {
        async fn fetch_order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RelayDbError>;
        async fn fetch_user_by_id(&self, id: i64) -> Result<Option<User>, RelayDbError>;
        async fn fetch_food_by_id(&self, id: i64) -> Result<Option<Food>, RelayDbError>;
        async fn fetch_restaurant_by_id(&self, id: i64) -> Result<Option<Restaurant>, RelayDbError>;
    }
}

mock! {
    pub Resolver {}
    impl CustomerResolver for Resolver {
        async fn resolve_customer(&self, customer_id: &str) -> Result<Customer, StripeApiError>;
    }
}
