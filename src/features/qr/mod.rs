//! QR source for the attendance page.
//!
//! The scan URL is derived once at startup from the configured page origin
//! plus the `?mode=scan` marker, and never changes for the process lifetime.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/qr` | No | Scan URL and its SVG QR rendering |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::QrService;
