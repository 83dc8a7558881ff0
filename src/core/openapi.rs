use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::asistencias::{
    dtos as asistencias_dtos, handlers as asistencias_handlers, models as asistencias_models,
};
use crate::features::qr::{dtos as qr_dtos, handlers as qr_handlers};
use crate::features::ubicacion::{
    dtos as ubicacion_dtos, handlers as ubicacion_handlers, models as ubicacion_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Asistencias (public)
        asistencias_handlers::asistencia_handler::create_asistencia,
        asistencias_handlers::asistencia_handler::list_asistencias,
        asistencias_handlers::asistencia_handler::stream_asistencias,
        // Ubicacion (public)
        ubicacion_handlers::ubicacion_handler::reverse_ubicacion,
        // QR (public)
        qr_handlers::qr_handler::get_qr,
        // Admin
        asistencias_handlers::admin_handler::delete_all_asistencias,
        asistencias_handlers::admin_handler::export_asistencias,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Asistencias
            asistencias_dtos::CreateAsistenciaDto,
            asistencias_dtos::AsistenciaResponseDto,
            asistencias_dtos::FeedSnapshotDto,
            asistencias_dtos::PurgaResponseDto,
            asistencias_models::EstrategiaPurga,
            ApiResponse<asistencias_dtos::AsistenciaResponseDto>,
            ApiResponse<asistencias_dtos::FeedSnapshotDto>,
            ApiResponse<asistencias_dtos::PurgaResponseDto>,
            // Ubicacion
            ubicacion_models::LocationOutcome,
            ubicacion_dtos::UbicacionResponseDto,
            ApiResponse<ubicacion_dtos::UbicacionResponseDto>,
            // QR
            qr_dtos::QrResponseDto,
            ApiResponse<qr_dtos::QrResponseDto>,
        )
    ),
    tags(
        (name = "asistencias", description = "Attendance submissions and live feed (public)"),
        (name = "ubicacion", description = "Reverse geocoding for the scan form (public)"),
        (name = "qr", description = "QR source for the attendance page (public)"),
        (name = "admin", description = "Bulk delete and spreadsheet export (basic auth)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Asistencia QR API",
        version = "0.1.0",
        description = "API del registro de asistencia con QR",
    )
)]
pub struct ApiDoc;

/// Adds the basic-auth security scheme used by the admin routes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
