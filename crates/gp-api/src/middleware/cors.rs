use axum::http::{Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS layer for the browser frontend.
///
/// Origins come from configuration; unparseable entries are skipped.
/// Credentials are enabled because the session rides in a cookie.
pub fn create_cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let origins = allowed_origins
        .into_iter()
        .filter_map(|origin| origin.parse::<axum::http::HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .allow_credentials(true)
}
