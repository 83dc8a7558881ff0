use rust_xlsxwriter::{Format, Workbook};

use crate::core::error::{AppError, Result};
use crate::features::asistencias::dtos::AsistenciaResponseDto;
use crate::shared::fechas;

const CABECERAS: [&str; 6] = ["#", "Nombre", "Comuna", "Fecha", "Hora", "Registrado"];

/// One spreadsheet row, already formatted for Chile
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FilaExport {
    pub n: u32,
    pub nombre: String,
    pub comuna: String,
    pub fecha: String,
    pub hora: String,
    pub registrado: String,
}

pub(crate) fn construir_filas(asistencias: &[AsistenciaResponseDto]) -> Vec<FilaExport> {
    asistencias
        .iter()
        .enumerate()
        .map(|(i, a)| FilaExport {
            n: (i + 1) as u32,
            nombre: a.nombre.clone(),
            comuna: a.comuna.clone(),
            fecha: a.fecha_display.clone(),
            hora: a.hora_display.clone(),
            registrado: fechas::formatear_registrado(a.creado_en),
        })
        .collect()
}

/// Service for the client-downloadable XLSX export of the current feed
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Build the workbook from the in-memory record set.
    ///
    /// Returns the download filename (embedding today's date) and the file
    /// bytes. An empty record set is refused with a warning instead of
    /// producing an empty file.
    pub fn exportar(&self, asistencias: &[AsistenciaResponseDto]) -> Result<(String, Vec<u8>)> {
        if asistencias.is_empty() {
            tracing::warn!("Exportación omitida: no hay asistencias en memoria");
            return Err(AppError::NotFound(
                "No hay asistencias para exportar".to_string(),
            ));
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let header_format = Format::new().set_bold();

        for (c, cabecera) in CABECERAS.iter().enumerate() {
            worksheet
                .write_with_format(0, c as u16, *cabecera, &header_format)
                .map_err(|e| AppError::Internal(e.to_string()))?;
        }
        let _ = worksheet.set_freeze_panes(1, 0);

        for (r, fila) in construir_filas(asistencias).iter().enumerate() {
            let row = (r + 1) as u32;
            worksheet
                .write(row, 0, fila.n)
                .and_then(|ws| ws.write(row, 1, fila.nombre.as_str()))
                .and_then(|ws| ws.write(row, 2, fila.comuna.as_str()))
                .and_then(|ws| ws.write(row, 3, fila.fecha.as_str()))
                .and_then(|ws| ws.write(row, 4, fila.hora.as_str()))
                .and_then(|ws| ws.write(row, 5, fila.registrado.as_str()))
                .map_err(|e| AppError::Internal(e.to_string()))?;
        }

        let bytes = workbook
            .save_to_buffer()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let nombre_archivo = format!("asistencias_{}.xlsx", fechas::fecha_de_hoy());
        tracing::info!(
            "Exportación generada: {} ({} filas)",
            nombre_archivo,
            asistencias.len()
        );

        Ok((nombre_archivo, bytes))
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::asistencias::models::Asistencia;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use fake::faker::name::en::Name;
    use fake::Fake;
    use uuid::Uuid;

    fn registro(nombre: &str, comuna: &str) -> AsistenciaResponseDto {
        AsistenciaResponseDto::from(Asistencia {
            id: Uuid::new_v4(),
            nombre: nombre.to_string(),
            comuna: comuna.to_string(),
            fecha: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            hora: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
            creado_en: Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 45).unwrap(),
        })
    }

    #[test]
    fn las_filas_llevan_numero_de_secuencia_y_formato_chileno() {
        let filas = construir_filas(&[registro("Aldo", "Maipú"), registro("Berta", "Santiago")]);

        assert_eq!(filas.len(), 2);
        assert_eq!(filas[0].n, 1);
        assert_eq!(filas[1].n, 2);
        assert_eq!(filas[0].fecha, "14-06-2024");
        assert_eq!(filas[0].hora, "08:30");
        assert_eq!(filas[0].registrado, "15-06-2024 08:30:45");
    }

    #[test]
    fn un_conjunto_vacio_no_genera_archivo() {
        let export = ExportService::new();
        let resultado = export.exportar(&[]);
        assert!(matches!(
            resultado,
            Err(crate::core::error::AppError::NotFound(_))
        ));
    }

    #[test]
    fn un_conjunto_con_filas_produce_un_xlsx() {
        let export = ExportService::new();
        let asistencias: Vec<AsistenciaResponseDto> = (0..3)
            .map(|_| registro(&Name().fake::<String>(), "Maipú"))
            .collect();
        let (nombre, bytes) = export
            .exportar(&asistencias)
            .expect("export should succeed");
        assert!(nombre.starts_with("asistencias_"));
        assert!(nombre.ends_with(".xlsx"));
        // XLSX files are ZIP containers
        assert_eq!(&bytes[0..2], b"PK");
    }
}
