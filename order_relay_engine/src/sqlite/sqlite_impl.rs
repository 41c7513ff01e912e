//! `SqliteDatabase` is a concrete implementation of an order relay backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements the traits defined in the [`crate::traits`] module.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{catalog, db_url, new_pool, orders, users};
use crate::{
    db_types::{Food, Order, OrderId, OrderItem, Restaurant, User},
    traits::{FulfillmentLookup, RelayDatabase, RelayDbError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl RelayDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn fetch_order_by_id(&self, id: OrderId) -> Result<Option<Order>, RelayDbError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_id(id, &mut conn).await?;
        Ok(order)
    }

    async fn mark_payment_completed(&self, id: OrderId) -> Result<Option<Order>, RelayDbError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::mark_payment_completed(id, &mut conn).await?;
        Ok(order)
    }
}

impl FulfillmentLookup for SqliteDatabase {
    async fn fetch_order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RelayDbError> {
        let mut conn = self.pool.acquire().await?;
        let items = orders::fetch_order_items(order_id, &mut conn).await?;
        Ok(items)
    }

    async fn fetch_user_by_id(&self, id: i64) -> Result<Option<User>, RelayDbError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::fetch_user_by_id(id, &mut conn).await?;
        Ok(user)
    }

    async fn fetch_food_by_id(&self, id: i64) -> Result<Option<Food>, RelayDbError> {
        let mut conn = self.pool.acquire().await?;
        let food = catalog::fetch_food_by_id(id, &mut conn).await?;
        Ok(food)
    }

    async fn fetch_restaurant_by_id(&self, id: i64) -> Result<Option<Restaurant>, RelayDbError> {
        let mut conn = self.pool.acquire().await?;
        let restaurant = catalog::fetch_restaurant_by_id(id, &mut conn).await?;
        Ok(restaurant)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
