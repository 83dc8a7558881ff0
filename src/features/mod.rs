pub mod asistencias;
pub mod qr;
pub mod ubicacion;
