use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::asistencias::handlers::{self, AdminState, AsistenciasState};

/// Create public routes for the asistencias feature
pub fn routes(state: AsistenciasState) -> Router {
    Router::new()
        .route(
            "/api/asistencias",
            post(handlers::create_asistencia).get(handlers::list_asistencias),
        )
        .route(
            "/api/asistencias/stream",
            get(handlers::stream_asistencias),
        )
        .with_state(state)
}

/// Create admin routes (nested under /api/admin, basic-auth guarded)
pub fn admin_routes(state: AdminState) -> Router {
    Router::new()
        .route("/asistencias", delete(handlers::delete_all_asistencias))
        .route(
            "/asistencias/export",
            get(handlers::export_asistencias),
        )
        .with_state(state)
}
