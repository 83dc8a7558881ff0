use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::ubicacion::handlers;
use crate::features::ubicacion::services::GeocodingService;

/// Create routes for the ubicacion feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<GeocodingService>) -> Router {
    Router::new()
        .route(
            "/api/ubicacion/reverse",
            get(handlers::reverse_ubicacion),
        )
        .with_state(service)
}
