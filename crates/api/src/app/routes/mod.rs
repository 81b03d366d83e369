use axum::{routing::get, Router};

pub mod auth;
pub mod chat;
pub mod screenings;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/screenings", screenings::router())
        .nest("/chat", chat::router())
}
