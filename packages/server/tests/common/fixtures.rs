//! Test fixtures for creating test data.

use anyhow::Result;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use server_core::common::auth::Role;
use server_core::common::UserId;
use server_core::domains::auth::password;
use server_core::domains::profiles::models::User;

/// Create a user with the given role and a unique username.
pub async fn create_user_with_role(pool: &PgPool, role: Role) -> Result<User> {
    let username = format!("user-{}", Uuid::new_v4());
    let salt = password::generate_salt();
    let hash = password::hash_password("testpass", &salt);
    let user = User::register(
        username,
        "test@example.com".to_string(),
        hash,
        salt,
        role,
        pool,
    )
    .await?;
    Ok(user)
}

pub async fn create_business_user(pool: &PgPool) -> Result<User> {
    create_user_with_role(pool, Role::Business).await
}

pub async fn create_customer_user(pool: &PgPool) -> Result<User> {
    create_user_with_role(pool, Role::Customer).await
}

/// Create a staff user. Admin accounts carry no marketplace profile.
pub async fn create_admin_user(pool: &PgPool) -> Result<User> {
    let username = format!("admin-{}", Uuid::new_v4());
    let salt = password::generate_salt();
    let hash = password::hash_password("testpass", &salt);

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, email, password_hash, password_salt, is_staff)
        VALUES ($1, $2, $3, $4, $5, TRUE)
        RETURNING *
        "#,
    )
    .bind(UserId::new())
    .bind(username)
    .bind("admin@example.com")
    .bind(hash)
    .bind(salt)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// The canonical three-tier offer payload used across tests.
pub fn offer_payload() -> Value {
    json!({
        "title": "Graphic design package",
        "description": "A complete graphic design package for businesses.",
        "details": [
            {
                "title": "Basic Design",
                "revisions": 2,
                "delivery_time_in_days": 5,
                "price": 100,
                "features": ["Logo Design", "Business Card"],
                "offer_type": "basic"
            },
            {
                "title": "Standard Design",
                "revisions": 5,
                "delivery_time_in_days": 7,
                "price": 200,
                "features": ["Logo Design", "Business Card", "Letterhead"],
                "offer_type": "standard"
            },
            {
                "title": "Premium Design",
                "revisions": 10,
                "delivery_time_in_days": 10,
                "price": 500,
                "features": ["Logo Design", "Business Card", "Letterhead", "Flyer"],
                "offer_type": "premium"
            }
        ]
    })
}
