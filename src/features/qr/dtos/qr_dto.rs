use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response DTO for the QR source
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QrResponseDto {
    /// The URL the QR encodes (origin + path + `?mode=scan`)
    pub url: String,
    /// Scannable SVG rendering of the URL
    pub svg: String,
}
