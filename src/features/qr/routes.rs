use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::qr::handlers;
use crate::features::qr::services::QrService;

/// Create routes for the qr feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<QrService>) -> Router {
    Router::new()
        .route("/api/qr", get(handlers::get_qr))
        .with_state(service)
}
