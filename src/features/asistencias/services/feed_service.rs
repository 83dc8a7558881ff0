use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::asistencias::dtos::{AsistenciaResponseDto, FeedSnapshotDto};
use crate::features::asistencias::models::Asistencia;

/// In-memory live list: an ordering index over records keyed by id.
///
/// Push events are prepended (every record is server-timestamped at insert,
/// so an arriving event is newer than anything already loaded) and the id
/// key guards against duplicate delivery. A fetch replaces the whole thing.
#[derive(Debug, Default)]
pub struct Feed {
    orden: Vec<Uuid>,
    registros: HashMap<Uuid, AsistenciaResponseDto>,
}

impl Feed {
    /// Replace the contents with freshly fetched rows (already newest-first)
    pub fn reemplazar(&mut self, asistencias: Vec<AsistenciaResponseDto>) {
        self.orden.clear();
        self.registros.clear();
        for asistencia in asistencias {
            // A duplicate id in a fetch keeps the first (newest) occurrence
            if !self.registros.contains_key(&asistencia.id) {
                self.orden.push(asistencia.id);
                self.registros.insert(asistencia.id, asistencia);
            }
        }
    }

    /// Prepend one pushed record. Returns false for duplicate ids.
    pub fn prepend(&mut self, asistencia: AsistenciaResponseDto) -> bool {
        if self.registros.contains_key(&asistencia.id) {
            return false;
        }
        self.orden.insert(0, asistencia.id);
        self.registros.insert(asistencia.id, asistencia);
        true
    }

    pub fn clear(&mut self) {
        self.orden.clear();
        self.registros.clear();
    }

    pub fn len(&self) -> usize {
        self.orden.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.orden.is_empty()
    }

    /// Records in feed order (pushed events first, then the fetched page)
    pub fn snapshot(&self) -> Vec<AsistenciaResponseDto> {
        self.orden
            .iter()
            .filter_map(|id| self.registros.get(id).cloned())
            .collect()
    }

    /// Attendance count per displayed comuna
    pub fn por_comuna(&self) -> BTreeMap<String, i64> {
        let mut conteo = BTreeMap::new();
        for asistencia in self.registros.values() {
            *conteo.entry(asistencia.comuna.clone()).or_insert(0) += 1;
        }
        conteo
    }
}

/// Live attendance feed: one fetch at startup, then insert events applied
/// as they arrive. Reads never touch the database except through
/// [`FeedService::cargar`].
pub struct FeedService {
    pool: PgPool,
    feed: RwLock<Feed>,
}

impl FeedService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            feed: RwLock::new(Feed::default()),
        }
    }

    /// Fetch all records ordered (fecha DESC, hora DESC), validate their
    /// comunas for display, and replace the in-memory list. Returns the
    /// loaded count.
    pub async fn cargar(&self) -> Result<usize> {
        let filas = sqlx::query_as::<_, Asistencia>(
            r#"
            SELECT id, nombre, comuna, fecha, hora, creado_en
            FROM asistencias
            ORDER BY fecha DESC, hora DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load the attendance feed: {:?}", e);
            AppError::Database(e)
        })?;

        let validadas: Vec<AsistenciaResponseDto> = filas
            .into_iter()
            .map(|a| AsistenciaResponseDto::from(a).validada())
            .collect();
        let total = validadas.len();

        self.feed.write().await.reemplazar(validadas);
        tracing::info!("Feed de asistencias cargado: {} registros", total);

        Ok(total)
    }

    /// Validate and prepend one pushed insert event. Duplicate ids are
    /// dropped (the push channel is trusted for ordering, not uniqueness).
    pub async fn aplicar_evento(&self, asistencia: AsistenciaResponseDto) -> bool {
        let validada = asistencia.validada();
        let id = validada.id;
        let aplicada = self.feed.write().await.prepend(validada);
        if !aplicada {
            tracing::debug!("Evento duplicado ignorado: id={}", id);
        }
        aplicada
    }

    /// Clear the in-memory list (bulk delete does this before reloading)
    pub async fn vaciar(&self) {
        self.feed.write().await.clear();
    }

    pub async fn snapshot(&self) -> FeedSnapshotDto {
        let feed = self.feed.read().await;
        FeedSnapshotDto {
            total: feed.len() as i64,
            por_comuna: feed.por_comuna(),
            asistencias: feed.snapshot(),
        }
    }

    /// Consume insert events until the channel closes. Lagged receivers log
    /// and keep going; a reload will reconcile anything missed.
    pub fn escuchar(
        self: &Arc<Self>,
        mut eventos: broadcast::Receiver<AsistenciaResponseDto>,
    ) -> JoinHandle<()> {
        let feed = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match eventos.recv().await {
                    Ok(asistencia) => {
                        feed.aplicar_evento(asistencia).await;
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("Feed atrasado: {} eventos perdidos", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    fn registro(nombre: &str, comuna: &str, fecha: (i32, u32, u32), hora: (u32, u32)) -> AsistenciaResponseDto {
        AsistenciaResponseDto::from(Asistencia {
            id: Uuid::new_v4(),
            nombre: nombre.to_string(),
            comuna: comuna.to_string(),
            fecha: NaiveDate::from_ymd_opt(fecha.0, fecha.1, fecha.2).unwrap(),
            hora: NaiveTime::from_hms_opt(hora.0, hora.1, 0).unwrap(),
            creado_en: Utc
                .with_ymd_and_hms(fecha.0, fecha.1, fecha.2, hora.0, hora.1, 0)
                .unwrap(),
        })
    }

    #[test]
    fn los_eventos_se_anteponen_a_la_pagina_cargada() {
        let mut feed = Feed::default();
        // Fetched page, already newest-first
        feed.reemplazar(vec![
            registro("Berta", "Santiago", (2024, 1, 2), (10, 0)),
            registro("Aldo", "Maipú", (2024, 1, 1), (9, 0)),
        ]);

        let empujado = registro("Carla", "Ñuñoa", (2024, 1, 3), (8, 0));
        assert!(feed.prepend(empujado.clone()));

        let nombres: Vec<String> = feed.snapshot().iter().map(|a| a.nombre.clone()).collect();
        assert_eq!(nombres, vec!["Carla", "Berta", "Aldo"]);
    }

    #[test]
    fn varios_eventos_quedan_en_orden_de_llegada() {
        let mut feed = Feed::default();
        feed.reemplazar(vec![registro("Aldo", "Maipú", (2024, 1, 1), (9, 0))]);

        feed.prepend(registro("Berta", "Santiago", (2024, 1, 2), (10, 0)));
        feed.prepend(registro("Carla", "Ñuñoa", (2024, 1, 2), (11, 0)));

        let nombres: Vec<String> = feed.snapshot().iter().map(|a| a.nombre.clone()).collect();
        // Newest pushed first, then the earlier push, then the fetched page
        assert_eq!(nombres, vec!["Carla", "Berta", "Aldo"]);
    }

    #[test]
    fn un_id_duplicado_se_ignora() {
        let mut feed = Feed::default();
        let a = registro("Aldo", "Maipú", (2024, 1, 1), (9, 0));
        assert!(feed.prepend(a.clone()));
        assert!(!feed.prepend(a));
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn el_conteo_por_comuna_usa_la_comuna_mostrada() {
        let mut feed = Feed::default();
        feed.reemplazar(vec![
            registro("Aldo", "Maipú", (2024, 1, 1), (9, 0)).validada(),
            registro("Berta", "Maipú", (2024, 1, 1), (10, 0)).validada(),
            registro("Carla", "Gotham", (2024, 1, 1), (11, 0)).validada(),
        ]);

        let conteo = feed.por_comuna();
        assert_eq!(conteo.get("Maipú"), Some(&2));
        assert_eq!(conteo.get("Comuna no reconocida"), Some(&1));
        assert_eq!(conteo.get("Gotham"), None);
    }

    #[test]
    fn vaciar_deja_el_feed_vacio() {
        let mut feed = Feed::default();
        feed.reemplazar(vec![registro("Aldo", "Maipú", (2024, 1, 1), (9, 0))]);
        feed.clear();
        assert!(feed.is_empty());
        assert!(feed.snapshot().is_empty());
    }

    #[tokio::test]
    async fn el_listener_aplica_eventos_del_canal() {
        let (tx, rx) = broadcast::channel(8);
        let feed = Arc::new(FeedService::new(crate::core::database::lazy_test_pool()));
        let tarea = feed.escuchar(rx);

        tx.send(registro("Aldo", "Maipú", (2024, 1, 1), (9, 0))).unwrap();
        drop(tx);
        // Channel closed -> listener drains what it received and exits
        tarea.await.unwrap();

        let snapshot = feed.snapshot().await;
        assert_eq!(snapshot.total, 1);
        assert_eq!(snapshot.asistencias[0].nombre, "Aldo");
    }
}
