use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};

use crate::{auth, game, state::ApiState, student};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .merge(game::routes())
        .merge(student::routes())
        .merge(auth::routes())
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
