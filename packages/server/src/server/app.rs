//! Application setup and router configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    create_offer, create_order, create_review, delete_offer, delete_order, delete_review,
    get_profile, health_handler, list_business_profiles, list_customer_profiles,
    list_offer_details, list_offers, list_orders, list_reviews, login_handler, order_count,
    patch_offer, patch_order, patch_profile, patch_review, registration_handler, retrieve_offer,
    retrieve_offer_detail, retrieve_order, retrieve_review, stats_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, jwt_service: JwtService) -> Router {
    let state = AppState {
        db_pool: pool,
        jwt_service: Arc::new(jwt_service),
    };
    let jwt = state.jwt_service.clone();

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/registration", post(registration_handler))
        .route("/login", post(login_handler))
        .route("/profile/:user_id", get(get_profile).patch(patch_profile))
        .route("/profiles/business", get(list_business_profiles))
        .route("/profiles/customer", get(list_customer_profiles))
        .route("/offers", get(list_offers).post(create_offer))
        .route(
            "/offers/:id",
            get(retrieve_offer).patch(patch_offer).delete(delete_offer),
        )
        .route("/offerdetails", get(list_offer_details))
        .route("/offerdetails/:id", get(retrieve_offer_detail))
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/count/:business_id", get(order_count))
        .route(
            "/orders/:id",
            get(retrieve_order).patch(patch_order).delete(delete_order),
        )
        .route("/reviews", get(list_reviews).post(create_review))
        .route(
            "/reviews/:id",
            get(retrieve_review)
                .patch(patch_review)
                .delete(delete_review),
        )
        .layer(middleware::from_fn(move |request, next| {
            jwt_auth_middleware(jwt.clone(), request, next)
        }))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
