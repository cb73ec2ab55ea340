use axum::Router;

use crate::state::AppState;

pub mod appointments;
pub mod auth;
pub mod blogs;
pub mod cart;
pub mod dashboard;
pub mod doc;
pub mod health;
pub mod health_profile;
pub mod orders;
pub mod params;
pub mod partners;
pub mod products;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/products", products::router())
        .nest("/cart", cart::router())
        .nest("/partners", partners::router())
        .nest("/appointments", appointments::router())
        .nest("/blogs", blogs::router())
        .nest("/health-profile", health_profile::router())
        .nest("/orders", orders::router())
        .nest("/dashboard", dashboard::router())
}
