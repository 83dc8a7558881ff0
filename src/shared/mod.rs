pub mod comunas;
pub mod constants;
pub mod fechas;
pub mod types;
