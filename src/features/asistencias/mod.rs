//! Attendance records submitted from the QR scan form.
//!
//! Ingestion flows one way: the form inserts a row, the insert is published
//! on the in-process event channel, and the live feed (plus any SSE
//! subscriber) picks it up from there. Reads come from the feed's in-memory
//! snapshot, loaded once at startup and reloaded only on demand.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/asistencias` | No | Submit one attendance record |
//! | GET | `/api/asistencias` | No | Feed snapshot (`?reload=true` re-reads the store) |
//! | GET | `/api/asistencias/stream` | No | SSE insert events |
//! | DELETE | `/api/admin/asistencias` | Basic | Bulk delete (three-tier fallback) |
//! | GET | `/api/admin/asistencias/export` | Basic | XLSX download |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{AsistenciaService, ExportService, FeedService};
