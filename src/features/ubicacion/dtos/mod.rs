pub mod ubicacion_dto;

pub use ubicacion_dto::{ReverseQuery, UbicacionResponseDto};
