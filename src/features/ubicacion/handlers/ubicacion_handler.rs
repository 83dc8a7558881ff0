use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::features::ubicacion::dtos::{ReverseQuery, UbicacionResponseDto};
use crate::features::ubicacion::models::LocationOutcome;
use crate::features::ubicacion::services::GeocodingService;
use crate::shared::types::ApiResponse;

/// Reverse-geocode coordinates to a comuna
///
/// The scan form calls this with the coordinates obtained from the browser.
/// Lookup failures map to a 502 so the form can report the `failed` outcome.
#[utoipa::path(
    get,
    path = "/api/ubicacion/reverse",
    params(ReverseQuery),
    responses(
        (status = 200, description = "Resolved comuna", body = ApiResponse<UbicacionResponseDto>),
        (status = 400, description = "Coordinates out of range"),
        (status = 502, description = "Reverse geocoding failed")
    ),
    tag = "ubicacion"
)]
pub async fn reverse_ubicacion(
    State(service): State<Arc<GeocodingService>>,
    Query(query): Query<ReverseQuery>,
) -> Result<Json<ApiResponse<UbicacionResponseDto>>> {
    if !(-90.0..=90.0).contains(&query.lat) || !(-180.0..=180.0).contains(&query.lon) {
        return Err(AppError::Validation(
            "Coordenadas fuera de rango".to_string(),
        ));
    }

    let comuna = service.reverse(query.lat, query.lon).await?;
    tracing::info!("Ubicación resuelta: ({}, {}) -> {}", query.lat, query.lon, comuna);

    Ok(Json(ApiResponse::success(
        Some(UbicacionResponseDto {
            ubicacion: LocationOutcome::Resolved { comuna },
        }),
        None,
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;

    use crate::core::config::GeocodingConfig;
    use crate::features::ubicacion::routes;
    use crate::features::ubicacion::services::GeocodingService;
    use std::sync::Arc;

    fn servidor() -> TestServer {
        let config = GeocodingConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            user_agent: "test".to_string(),
            accept_language: "es".to_string(),
            zoom: 10,
            timeout_secs: 1,
        };
        let service = Arc::new(GeocodingService::new(&config));
        TestServer::new(routes::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn rechaza_coordenadas_fuera_de_rango() {
        let server = servidor();
        let response = server
            .get("/api/ubicacion/reverse")
            .add_query_param("lat", "95.0")
            .add_query_param("lon", "0.0")
            .await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn un_upstream_caido_responde_bad_gateway() {
        let server = servidor();
        let response = server
            .get("/api/ubicacion/reverse")
            .add_query_param("lat", "-33.45")
            .add_query_param("lon", "-70.66")
            .await;
        response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
    }
}
