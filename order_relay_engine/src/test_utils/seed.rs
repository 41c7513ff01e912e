//! Seed data for integration tests. Inserts rows the way the storefront would and returns their ids.
use ofr_common::Money;

use crate::{
    db_types::{OrderId, PaymentStatus},
    SqliteDatabase,
};

pub async fn seed_user(db: &SqliteDatabase, name: &str, fcm_token: Option<&str>) -> i64 {
    let row: (i64,) = sqlx::query_as("INSERT INTO users (name, email, fcm_token) VALUES ($1, $2, $3) RETURNING id")
        .bind(name)
        .bind(format!("{name}@example.com"))
        .bind(fcm_token)
        .fetch_one(db.pool())
        .await
        .expect("Error seeding user");
    row.0
}

pub async fn seed_restaurant(db: &SqliteDatabase, title: &str, owner_id: i64) -> i64 {
    let row: (i64,) = sqlx::query_as("INSERT INTO restaurants (title, owner_id) VALUES ($1, $2) RETURNING id")
        .bind(title)
        .bind(owner_id)
        .fetch_one(db.pool())
        .await
        .expect("Error seeding restaurant");
    row.0
}

pub async fn seed_food(db: &SqliteDatabase, title: &str, restaurant_id: i64, image_url: &str) -> i64 {
    let row: (i64,) =
        sqlx::query_as("INSERT INTO foods (title, restaurant_id, image_urls) VALUES ($1, $2, $3) RETURNING id")
            .bind(title)
            .bind(restaurant_id)
            .bind(format!(r#"["{image_url}"]"#))
            .fetch_one(db.pool())
            .await
            .expect("Error seeding food");
    row.0
}

pub async fn seed_order(
    db: &SqliteDatabase,
    user_id: i64,
    restaurant_id: i64,
    total: Money,
    status: PaymentStatus,
) -> OrderId {
    let row: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO orders (user_id, restaurant_id, delivery_address_id, order_total, delivery_fee, grand_total,
                            payment_method, payment_status)
        VALUES ($1, $2, 1, $3, 0, $3, 'card', $4)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(restaurant_id)
    .bind(total)
    .bind(status.to_string())
    .fetch_one(db.pool())
    .await
    .expect("Error seeding order");
    OrderId(row.0)
}

pub async fn seed_order_item(db: &SqliteDatabase, order_id: OrderId, food_id: i64, price: Money) -> i64 {
    let row: (i64,) =
        sqlx::query_as("INSERT INTO order_items (order_id, food_id, quantity, price) VALUES ($1, $2, 1, $3) RETURNING id")
            .bind(order_id)
            .bind(food_id)
            .bind(price)
            .fetch_one(db.pool())
            .await
            .expect("Error seeding order item");
    row.0
}
