pub mod ubicacion_handler;

pub use ubicacion_handler::reverse_ubicacion;
