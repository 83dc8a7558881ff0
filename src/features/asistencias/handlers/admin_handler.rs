use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};

use crate::core::error::{AppError, Result};
use crate::features::asistencias::dtos::PurgaResponseDto;
use crate::features::asistencias::services::{AsistenciaService, ExportService, FeedService};
use crate::shared::types::ApiResponse;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// State for the admin handlers
#[derive(Clone)]
pub struct AdminState {
    pub service: Arc<AsistenciaService>,
    pub feed: Arc<FeedService>,
    pub export: Arc<ExportService>,
}

/// Bulk delete every attendance record
///
/// Escalates through the three delete tiers, clears the in-memory feed
/// immediately, then reloads it to reconcile with backend truth. Reports
/// success only when the purge was actually confirmed.
#[utoipa::path(
    delete,
    path = "/api/admin/asistencias",
    responses(
        (status = 200, description = "Purga confirmada", body = ApiResponse<PurgaResponseDto>),
        (status = 500, description = "Every delete tier errored and rows remain")
    ),
    tag = "admin",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn delete_all_asistencias(
    State(state): State<AdminState>,
) -> Result<Json<ApiResponse<PurgaResponseDto>>> {
    let resultado = state.service.purge_all().await;

    // Clear right away and reload shortly after, confirmed or not; the feed
    // must reconcile with whatever actually survived in the store.
    state.feed.vaciar().await;
    let restantes = state.feed.cargar().await? as i64;

    let resultado = resultado?;

    Ok(Json(ApiResponse::success(
        Some(PurgaResponseDto {
            eliminadas: resultado.eliminadas,
            estrategia: resultado.estrategia,
            restantes,
        }),
        Some("Asistencias eliminadas".to_string()),
        None,
    )))
}

/// Download the current feed as an XLSX file
///
/// Exports the in-memory record set with a sequence number and Chile-local
/// date/time columns. Refuses when there is nothing to export.
#[utoipa::path(
    get,
    path = "/api/admin/asistencias/export",
    responses(
        (status = 200, description = "XLSX download", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 404, description = "No records to export")
    ),
    tag = "admin",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn export_asistencias(State(state): State<AdminState>) -> Result<Response> {
    let snapshot = state.feed.snapshot().await;
    let (nombre_archivo, bytes) = state.export.exportar(&snapshot.asistencias)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, XLSX_CONTENT_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", nombre_archivo),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::features::asistencias::routes;
    use axum_test::TestServer;
    use tokio::sync::broadcast;

    fn servidor() -> TestServer {
        let pool = lazy_test_pool();
        let (eventos, _) = broadcast::channel(8);
        let state = AdminState {
            service: Arc::new(AsistenciaService::new(pool.clone(), eventos)),
            feed: Arc::new(FeedService::new(pool)),
            export: Arc::new(ExportService::new()),
        };
        TestServer::new(routes::admin_routes(state)).unwrap()
    }

    #[tokio::test]
    async fn exportar_un_feed_vacio_devuelve_not_found() {
        let server = servidor();
        let response = server.get("/asistencias/export").await;
        response.assert_status_not_found();
    }
}
