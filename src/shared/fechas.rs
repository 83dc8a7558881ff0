//! Display formatting for the UTC-stored `fecha`/`hora`/`creado_en` values.
//!
//! The backend assigns dates and times in UTC; the table and the export
//! render them in Chilean local time (es-CL, 24-hour clock).

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::America::Santiago;

/// dd-mm-yyyy, as seen from Santiago at UTC midnight of the stored date
pub fn formatear_fecha(fecha: NaiveDate) -> String {
    let medianoche_utc = Utc.from_utc_datetime(&fecha.and_time(NaiveTime::MIN));
    medianoche_utc
        .with_timezone(&Santiago)
        .format("%d-%m-%Y")
        .to_string()
}

/// HH:MM 24h in Santiago. The stored time is UTC time-of-day; the record's
/// own date resolves the UTC offset (Chile observes DST).
pub fn formatear_hora(fecha: NaiveDate, hora: NaiveTime) -> String {
    let instante_utc = Utc.from_utc_datetime(&fecha.and_time(hora));
    instante_utc
        .with_timezone(&Santiago)
        .format("%H:%M")
        .to_string()
}

/// Full registration timestamp for the export's "Registrado" column
pub fn formatear_registrado(creado_en: DateTime<Utc>) -> String {
    creado_en
        .with_timezone(&Santiago)
        .format("%d-%m-%Y %H:%M:%S")
        .to_string()
}

/// Current date in Santiago, used to name the export file
pub fn fecha_de_hoy() -> String {
    Utc::now()
        .with_timezone(&Santiago)
        .format("%d-%m-%Y")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hora(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn la_fecha_se_ve_desde_santiago() {
        // UTC midnight is still the previous evening in Chile
        assert_eq!(formatear_fecha(fecha(2024, 6, 15)), "14-06-2024");
        assert_eq!(formatear_fecha(fecha(2024, 1, 2)), "01-01-2024");
    }

    #[test]
    fn la_hora_usa_el_offset_de_invierno() {
        // June: Chile is at UTC-4
        assert_eq!(formatear_hora(fecha(2024, 6, 15), hora(12, 30, 0)), "08:30");
    }

    #[test]
    fn la_hora_usa_el_offset_de_verano() {
        // January: daylight saving, UTC-3
        assert_eq!(formatear_hora(fecha(2024, 1, 15), hora(12, 30, 0)), "09:30");
    }

    #[test]
    fn la_hora_cruza_la_medianoche() {
        // 02:00 UTC in June is 22:00 of the previous day in Chile
        assert_eq!(formatear_hora(fecha(2024, 6, 15), hora(2, 0, 0)), "22:00");
    }

    #[test]
    fn registrado_incluye_fecha_y_hora() {
        let creado = Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 45).unwrap();
        assert_eq!(formatear_registrado(creado), "15-06-2024 08:30:45");
    }
}
