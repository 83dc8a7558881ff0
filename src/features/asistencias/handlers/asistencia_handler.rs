use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::Stream;
use serde::Deserialize;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::asistencias::dtos::{
    AsistenciaResponseDto, CreateAsistenciaDto, FeedSnapshotDto,
};
use crate::features::asistencias::services::{AsistenciaService, FeedService};
use crate::shared::types::{ApiResponse, Meta};

/// State for the public attendance handlers
#[derive(Clone)]
pub struct AsistenciasState {
    pub service: Arc<AsistenciaService>,
    pub feed: Arc<FeedService>,
    pub eventos: broadcast::Sender<AsistenciaResponseDto>,
}

/// Query params for the feed snapshot
#[derive(Debug, Deserialize)]
pub struct ListAsistenciasQuery {
    /// If true, re-read the store before answering. Default: false
    #[serde(default)]
    pub reload: bool,
}

/// Submit one attendance record
///
/// Public endpoint hit by the scan form. The name is trimmed and required;
/// the location outcome normalizes to "Sin ubicación" unless a comuna was
/// actually resolved. Exactly one insert per request; a retry after an
/// error creates a new record.
#[utoipa::path(
    post,
    path = "/api/asistencias",
    request_body = CreateAsistenciaDto,
    responses(
        (status = 201, description = "Asistencia registrada", body = ApiResponse<AsistenciaResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "asistencias"
)]
pub async fn create_asistencia(
    State(state): State<AsistenciasState>,
    AppJson(dto): AppJson<CreateAsistenciaDto>,
) -> Result<(StatusCode, Json<ApiResponse<AsistenciaResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let nombre = dto.nombre.trim();
    if nombre.is_empty() {
        return Err(AppError::Validation("El nombre es obligatorio".to_string()));
    }

    let comuna = dto.ubicacion.normalizar();
    tracing::debug!("Registrando asistencia: ubicacion={}", dto.ubicacion);

    let asistencia = state.service.create(nombre, &comuna).await?;
    let mensaje = format!("¡Asistencia registrada! Gracias, {}", asistencia.nombre);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(asistencia), Some(mensaje), None)),
    ))
}

/// Feed snapshot
///
/// Serves the in-memory live list (validated comunas, newest first) without
/// touching the store; `?reload=true` forces a re-read first.
#[utoipa::path(
    get,
    path = "/api/asistencias",
    params(
        ("reload" = Option<bool>, Query, description = "Re-read the store before answering")
    ),
    responses(
        (status = 200, description = "Current feed", body = ApiResponse<FeedSnapshotDto>),
    ),
    tag = "asistencias"
)]
pub async fn list_asistencias(
    State(state): State<AsistenciasState>,
    Query(query): Query<ListAsistenciasQuery>,
) -> Result<Json<ApiResponse<FeedSnapshotDto>>> {
    if query.reload {
        state.feed.cargar().await?;
    }

    let snapshot = state.feed.snapshot().await;
    let total = snapshot.total;

    Ok(Json(ApiResponse::success(
        Some(snapshot),
        None,
        Some(Meta { total }),
    )))
}

/// Live insert events as SSE
///
/// One `asistencia.insert` event per new record, payload as stored (the
/// consumer applies the same display validation as the initial load).
/// Dropping the connection tears the subscription down.
#[utoipa::path(
    get,
    path = "/api/asistencias/stream",
    responses(
        (status = 200, description = "SSE stream of insert events", content_type = "text/event-stream"),
    ),
    tag = "asistencias"
)]
pub async fn stream_asistencias(
    State(state): State<AsistenciasState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let rx = state.eventos.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|evento| match evento {
        Ok(asistencia) => match Event::default()
            .event("asistencia.insert")
            .json_data(&asistencia)
        {
            Ok(event) => Some(Ok::<_, Infallible>(event)),
            Err(e) => {
                tracing::warn!("No se pudo serializar el evento SSE: {}", e);
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!("Suscriptor SSE atrasado: {} eventos omitidos", n);
            None
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;
    use crate::features::asistencias::routes;
    use axum_test::TestServer;
    use serde_json::json;

    fn servidor() -> TestServer {
        let pool = lazy_test_pool();
        let (eventos, _) = broadcast::channel(8);
        let state = AsistenciasState {
            service: Arc::new(AsistenciaService::new(pool.clone(), eventos.clone())),
            feed: Arc::new(FeedService::new(pool)),
            eventos,
        };
        TestServer::new(routes::routes(state)).unwrap()
    }

    #[tokio::test]
    async fn un_nombre_vacio_se_rechaza_antes_de_tocar_la_base() {
        let server = servidor();
        let response = server
            .post("/api/asistencias")
            .json(&json!({ "nombre": "   " }))
            .await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn el_snapshot_sin_recarga_no_necesita_base_de_datos() {
        let server = servidor();
        let response = server.get("/api/asistencias").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["total"], 0);
    }
}
