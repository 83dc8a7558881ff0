use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

use crate::core::error::{AppError, Result};
use crate::features::qr::dtos::QrResponseDto;
use crate::shared::constants::SCAN_QUERY;

/// Scan URL and its QR rendering, computed once at startup.
///
/// Consuming devices open the URL; the `mode=scan` marker is the entire
/// routing surface that sends them to the form view.
pub struct QrService {
    scan_url: String,
    svg: String,
}

/// origin + path + "?mode=scan"
pub fn construir_scan_url(base_url: &str) -> String {
    format!("{}{}", base_url, SCAN_QUERY)
}

impl QrService {
    pub fn new(public_base_url: &str) -> Result<Self> {
        let scan_url = construir_scan_url(public_base_url);

        // High error correction, same as the rendering the page used
        let code = QrCode::with_error_correction_level(scan_url.as_bytes(), EcLevel::H)
            .map_err(|e| AppError::Internal(format!("Failed to encode QR: {}", e)))?;

        let svg = code
            .render::<svg::Color>()
            .min_dimensions(256, 256)
            .build();

        Ok(Self { scan_url, svg })
    }

    pub fn scan_url(&self) -> &str {
        &self.scan_url
    }

    pub fn dto(&self) -> QrResponseDto {
        QrResponseDto {
            url: self.scan_url.clone(),
            svg: self.svg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn la_url_es_origen_mas_ruta_mas_el_marcador() {
        assert_eq!(
            construir_scan_url("http://localhost:3000/"),
            "http://localhost:3000/?mode=scan"
        );
        assert_eq!(
            construir_scan_url("https://asistencia.example.cl/clases"),
            "https://asistencia.example.cl/clases?mode=scan"
        );
    }

    #[test]
    fn la_url_es_estable_entre_lecturas() {
        let service = QrService::new("http://localhost:3000/").unwrap();
        let primera = service.dto();
        let segunda = service.dto();
        assert_eq!(primera.url, segunda.url);
        assert_eq!(primera.svg, segunda.svg);
        assert_eq!(service.scan_url(), "http://localhost:3000/?mode=scan");
    }

    #[test]
    fn el_svg_es_un_documento_renderizable() {
        let service = QrService::new("http://localhost:3000/").unwrap();
        let dto = service.dto();
        assert!(dto.svg.contains("<svg"));
    }
}
