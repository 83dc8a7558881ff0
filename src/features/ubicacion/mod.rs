//! Location resolution for the scan form.
//!
//! The browser obtains coordinates; this feature reverse-geocodes them to a
//! comuna through Nominatim. Every resolver state the form can be in is a
//! [`models::LocationOutcome`] variant rather than a sentinel string.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/ubicacion/reverse` | No | Reverse-geocode coordinates to a comuna |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::GeocodingService;
