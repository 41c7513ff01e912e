//! Lookups for the food and restaurant catalogue. These rows are written by the storefront; the relay only reads
//! them while assembling notifications.
use sqlx::SqliteConnection;

use crate::db_types::{Food, Restaurant};

pub async fn fetch_food_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Food>, sqlx::Error> {
    let food = sqlx::query_as("SELECT id, title, restaurant_id, image_urls FROM foods WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(food)
}

pub async fn fetch_restaurant_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Restaurant>, sqlx::Error> {
    let restaurant = sqlx::query_as("SELECT id, title, owner_id FROM restaurants WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(restaurant)
}
