use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::SIN_UBICACION;

/// Outcome of the form's location request.
///
/// The scan form reports whichever state it ended in alongside the name;
/// only `Resolved` carries a usable comuna. All other variants normalize to
/// the canonical "Sin ubicación" value at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LocationOutcome {
    /// The user never asked for their location
    NotRequested,
    /// A location request was still in flight when the form was submitted
    Resolving,
    /// Reverse geocoding produced a place name
    Resolved { comuna: String },
    /// Browser permission denied (geolocation error code 1)
    Denied,
    /// Position unavailable (geolocation error code 2)
    Unavailable,
    /// The 10-second location request timed out (geolocation error code 3)
    TimedOut,
    /// The environment has no geolocation capability
    Unsupported,
    /// Coordinates were obtained but the reverse-geocode lookup failed
    Failed,
}

impl Default for LocationOutcome {
    fn default() -> Self {
        LocationOutcome::NotRequested
    }
}

impl LocationOutcome {
    /// Map a browser geolocation error code to its outcome
    #[allow(dead_code)]
    pub fn desde_codigo(codigo: u8) -> Self {
        match codigo {
            1 => LocationOutcome::Denied,
            2 => LocationOutcome::Unavailable,
            3 => LocationOutcome::TimedOut,
            _ => LocationOutcome::Failed,
        }
    }

    /// Value persisted with the submission: the trimmed comuna when one was
    /// resolved, the canonical "Sin ubicación" otherwise.
    pub fn normalizar(&self) -> String {
        match self {
            LocationOutcome::Resolved { comuna } => {
                let comuna = comuna.trim();
                if comuna.is_empty() {
                    SIN_UBICACION.to_string()
                } else {
                    comuna.to_string()
                }
            }
            _ => SIN_UBICACION.to_string(),
        }
    }
}

impl fmt::Display for LocationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationOutcome::NotRequested => write!(f, "Ubicación no solicitada"),
            LocationOutcome::Resolving => write!(f, "Obteniendo ubicación..."),
            LocationOutcome::Resolved { comuna } => write!(f, "{}", comuna),
            LocationOutcome::Denied => write!(f, "Permiso denegado"),
            LocationOutcome::Unavailable => write!(f, "Ubicación no disponible"),
            LocationOutcome::TimedOut => write!(f, "Tiempo de espera agotado"),
            LocationOutcome::Unsupported => write!(f, "Geolocalización no soportada"),
            LocationOutcome::Failed => write!(f, "Error al obtener ubicación"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_fallo_normaliza_al_valor_canonico() {
        let fallos = [
            LocationOutcome::NotRequested,
            LocationOutcome::Resolving,
            LocationOutcome::Denied,
            LocationOutcome::Unavailable,
            LocationOutcome::TimedOut,
            LocationOutcome::Unsupported,
            LocationOutcome::Failed,
        ];
        for fallo in fallos {
            assert_eq!(fallo.normalizar(), SIN_UBICACION, "variante: {:?}", fallo);
        }
    }

    #[test]
    fn resolved_se_normaliza_recortado() {
        let resuelto = LocationOutcome::Resolved {
            comuna: "  Ñuñoa  ".to_string(),
        };
        assert_eq!(resuelto.normalizar(), "Ñuñoa");
    }

    #[test]
    fn resolved_vacio_cae_al_valor_canonico() {
        let vacio = LocationOutcome::Resolved {
            comuna: "   ".to_string(),
        };
        assert_eq!(vacio.normalizar(), SIN_UBICACION);
    }

    #[test]
    fn los_codigos_del_navegador_se_mapean() {
        assert_eq!(LocationOutcome::desde_codigo(1), LocationOutcome::Denied);
        assert_eq!(
            LocationOutcome::desde_codigo(2),
            LocationOutcome::Unavailable
        );
        assert_eq!(LocationOutcome::desde_codigo(3), LocationOutcome::TimedOut);
        assert_eq!(LocationOutcome::desde_codigo(9), LocationOutcome::Failed);
    }

    #[test]
    fn serializa_con_etiqueta_de_estado() {
        let json = serde_json::to_value(LocationOutcome::Resolved {
            comuna: "Valparaíso".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "resolved");
        assert_eq!(json["comuna"], "Valparaíso");

        let denied: LocationOutcome = serde_json::from_str(r#"{"status":"denied"}"#).unwrap();
        assert_eq!(denied, LocationOutcome::Denied);
    }
}
