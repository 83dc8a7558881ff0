pub mod asistencia_service;
pub mod export_service;
pub mod feed_service;

pub use asistencia_service::AsistenciaService;
pub use export_service::ExportService;
pub use feed_service::FeedService;
