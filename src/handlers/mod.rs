pub mod dashboard;
pub mod orgs;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect},
};

/// Root handler - redirect na dashboard
pub async fn index() -> impl IntoResponse {
    Redirect::to("/dashboard")
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub use orgs::AppState;
