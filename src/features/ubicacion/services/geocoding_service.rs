use std::time::Duration;

use serde::Deserialize;

use crate::core::config::GeocodingConfig;
use crate::core::error::{AppError, Result};
use crate::shared::constants::UBICACION_DESCONOCIDA;

/// Nominatim reverse-geocoding response structure
#[derive(Debug, Deserialize)]
pub struct NominatimResponse {
    pub address: Option<NominatimAddress>,
}

/// Nominatim address components, city-level fields only (zoom 10)
#[derive(Debug, Deserialize)]
pub struct NominatimAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
}

impl NominatimAddress {
    /// Extract the comuna: city, falling back to town, village, then state
    pub fn comuna(&self) -> Option<String> {
        self.city
            .clone()
            .or_else(|| self.town.clone())
            .or_else(|| self.village.clone())
            .or_else(|| self.state.clone())
    }
}

/// Service for reverse-geocoding coordinates using Nominatim
pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
    zoom: u8,
    accept_language: String,
}

impl GeocodingService {
    pub fn new(config: &GeocodingConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(config.user_agent.clone())
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.base_url.clone(),
            zoom: config.zoom,
            accept_language: config.accept_language.clone(),
        }
    }

    /// Reverse-geocode coordinates to a comuna name.
    ///
    /// Returns "Ubicación desconocida" when the lookup succeeds but carries
    /// no usable place field; lookup failures surface as errors so callers
    /// can report the `Failed` outcome.
    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<String> {
        let url = format!("{}/reverse", self.base_url);

        tracing::debug!("Reverse geocoding ({}, {}) -> {}", lat, lon, url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("zoom", self.zoom.to_string()),
                ("accept-language", self.accept_language.clone()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Nominatim request failed: {:?}", e);
                AppError::ExternalServiceError(format!("Nominatim request failed: {}", e))
            })?;

        if !response.status().is_success() {
            tracing::warn!("Nominatim returned status: {}", response.status());
            return Err(AppError::ExternalServiceError(format!(
                "Nominatim returned status {}",
                response.status()
            )));
        }

        let parsed: NominatimResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Nominatim response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse Nominatim response: {}", e))
        })?;

        Ok(parsed
            .address
            .as_ref()
            .and_then(|a| a.comuna())
            .unwrap_or_else(|| UBICACION_DESCONOCIDA.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(
        city: Option<&str>,
        town: Option<&str>,
        village: Option<&str>,
        state: Option<&str>,
    ) -> NominatimAddress {
        NominatimAddress {
            city: city.map(String::from),
            town: town.map(String::from),
            village: village.map(String::from),
            state: state.map(String::from),
        }
    }

    #[test]
    fn la_ciudad_tiene_prioridad() {
        let addr = address(Some("Santiago"), Some("Pirque"), None, Some("RM"));
        assert_eq!(addr.comuna(), Some("Santiago".to_string()));
    }

    #[test]
    fn cae_en_cascada_hasta_la_region() {
        assert_eq!(
            address(None, Some("Pirque"), None, None).comuna(),
            Some("Pirque".to_string())
        );
        assert_eq!(
            address(None, None, Some("Caleu"), None).comuna(),
            Some("Caleu".to_string())
        );
        assert_eq!(
            address(None, None, None, Some("Región Metropolitana")).comuna(),
            Some("Región Metropolitana".to_string())
        );
        assert_eq!(address(None, None, None, None).comuna(), None);
    }

    #[test]
    fn respuesta_sin_campos_produce_el_centinela() {
        let parsed: NominatimResponse = serde_json::from_str(r#"{"address":{}}"#).unwrap();
        let comuna = parsed
            .address
            .as_ref()
            .and_then(|a| a.comuna())
            .unwrap_or_else(|| UBICACION_DESCONOCIDA.to_string());
        assert_eq!(comuna, UBICACION_DESCONOCIDA);
    }
}
