pub mod admin_handler;
pub mod asistencia_handler;

pub use admin_handler::{delete_all_asistencias, export_asistencias, AdminState};
pub use asistencia_handler::{
    create_asistencia, list_asistencias, stream_asistencias, AsistenciasState,
};
