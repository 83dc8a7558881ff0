use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::asistencias::models::{Asistencia, EstrategiaPurga};
use crate::features::ubicacion::models::LocationOutcome;
use crate::shared::comunas::validar_comuna;
use crate::shared::constants::{SIN_COMUNA, SIN_NOMBRE};
use crate::shared::fechas;

/// Request DTO for submitting an attendance record
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAsistenciaDto {
    /// Full name of the attendee (required, trimmed before insert)
    #[validate(length(max = 255, message = "El nombre no puede superar 255 caracteres"))]
    pub nombre: String,

    /// Final state of the form's location request
    #[serde(default)]
    pub ubicacion: LocationOutcome,
}

/// Response DTO for one attendance record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AsistenciaResponseDto {
    pub id: Uuid,
    pub nombre: String,
    pub comuna: String,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub creado_en: DateTime<Utc>,
    /// `fecha` rendered for Chile (dd-mm-yyyy)
    pub fecha_display: String,
    /// `hora` rendered for Chile (24h HH:MM)
    pub hora_display: String,
}

impl From<Asistencia> for AsistenciaResponseDto {
    fn from(a: Asistencia) -> Self {
        Self {
            fecha_display: fechas::formatear_fecha(a.fecha),
            hora_display: fechas::formatear_hora(a.fecha, a.hora),
            id: a.id,
            nombre: a.nombre,
            comuna: a.comuna,
            fecha: a.fecha,
            hora: a.hora,
            creado_en: a.creado_en,
        }
    }
}

impl AsistenciaResponseDto {
    /// Feed display validation: default malformed fields, then rewrite any
    /// comuna outside the reference set. Stored data is never touched.
    pub fn validada(mut self) -> Self {
        if self.nombre.trim().is_empty() {
            self.nombre = SIN_NOMBRE.to_string();
        }
        let comuna = if self.comuna.trim().is_empty() {
            SIN_COMUNA.to_string()
        } else {
            self.comuna
        };
        self.comuna = validar_comuna(&comuna);
        self
    }
}

/// Feed snapshot: validated records newest-first plus per-comuna counts
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedSnapshotDto {
    pub asistencias: Vec<AsistenciaResponseDto>,
    pub total: i64,
    pub por_comuna: BTreeMap<String, i64>,
}

/// Response DTO for the admin bulk delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurgaResponseDto {
    /// Rows removed by the tier that completed
    pub eliminadas: u64,
    /// Tier that completed without error, if any
    pub estrategia: Option<EstrategiaPurga>,
    /// Rows still present after the purge and feed reload
    pub restantes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::COMUNA_NO_RECONOCIDA;

    fn dto(nombre: &str, comuna: &str) -> AsistenciaResponseDto {
        AsistenciaResponseDto::from(Asistencia {
            id: Uuid::new_v4(),
            nombre: nombre.to_string(),
            comuna: comuna.to_string(),
            fecha: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            hora: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
            creado_en: Utc::now(),
        })
    }

    #[test]
    fn una_comuna_conocida_sobrevive_la_validacion() {
        let validada = dto("Ana Rojas", "Maipú").validada();
        assert_eq!(validada.comuna, "Maipú");
        assert_eq!(validada.nombre, "Ana Rojas");
    }

    #[test]
    fn una_comuna_desconocida_se_reescribe() {
        let validada = dto("Ana Rojas", "Gotham").validada();
        assert_eq!(validada.comuna, COMUNA_NO_RECONOCIDA);
    }

    #[test]
    fn los_campos_vacios_reciben_sus_valores_por_defecto() {
        let validada = dto("   ", "").validada();
        assert_eq!(validada.nombre, SIN_NOMBRE);
        // "Sin comuna" is not in the reference set, so it renders rewritten
        assert_eq!(validada.comuna, COMUNA_NO_RECONOCIDA);
    }

    #[test]
    fn el_dto_lleva_las_columnas_de_display() {
        let d = dto("Ana Rojas", "Maipú");
        assert_eq!(d.fecha_display, "14-06-2024");
        assert_eq!(d.hora_display, "08:30");
    }
}
