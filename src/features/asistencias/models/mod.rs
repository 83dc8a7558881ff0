pub mod asistencia;
pub mod purga;

pub use asistencia::Asistencia;
pub use purga::{EstrategiaPurga, ResultadoPurga};
