pub mod asistencia_dto;

pub use asistencia_dto::{
    AsistenciaResponseDto, CreateAsistenciaDto, FeedSnapshotDto, PurgaResponseDto,
};
