use std::sync::Arc;

use axum::{extract::State, Json};

use crate::features::qr::dtos::QrResponseDto;
use crate::features::qr::services::QrService;
use crate::shared::types::ApiResponse;

/// QR source for the attendance page
///
/// The returned URL and SVG are constant for the process lifetime.
#[utoipa::path(
    get,
    path = "/api/qr",
    responses(
        (status = 200, description = "Scan URL and SVG QR", body = ApiResponse<QrResponseDto>),
    ),
    tag = "qr"
)]
pub async fn get_qr(State(service): State<Arc<QrService>>) -> Json<ApiResponse<QrResponseDto>> {
    Json(ApiResponse::success(Some(service.dto()), None, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::qr::routes;
    use axum_test::TestServer;

    #[tokio::test]
    async fn el_qr_responde_con_url_y_svg() {
        let service = Arc::new(QrService::new("http://localhost:3000/").unwrap());
        let server = TestServer::new(routes::routes(service)).unwrap();

        let response = server.get("/api/qr").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["url"], "http://localhost:3000/?mode=scan");
        assert!(body["data"]["svg"]
            .as_str()
            .unwrap()
            .contains("<svg"));
    }
}
