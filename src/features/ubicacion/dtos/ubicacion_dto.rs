use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::ubicacion::models::LocationOutcome;

/// Query parameters for the reverse-geocode lookup
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ReverseQuery {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

/// Response DTO carrying the resolver outcome
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UbicacionResponseDto {
    pub ubicacion: LocationOutcome,
}
