use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for one attendance record.
///
/// `fecha` and `hora` are assigned by the database in UTC at insert time;
/// rows are immutable once created (only the admin bulk delete removes them).
#[derive(Debug, Clone, FromRow)]
pub struct Asistencia {
    pub id: Uuid,
    pub nombre: String,
    pub comuna: String,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub creado_en: DateTime<Utc>,
}
