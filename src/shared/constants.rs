/// Canonical value stored when no usable location accompanied a submission.
/// Every resolver failure normalizes to this single literal.
pub const SIN_UBICACION: &str = "Sin ubicación";

/// Reverse geocoding succeeded but returned no usable place field.
/// Stored as-is; the feed rewrites it for display like any unknown comuna.
pub const UBICACION_DESCONOCIDA: &str = "Ubicación desconocida";

/// Display label for any comuna outside the reference set.
/// Not itself a member of the set, which keeps validation idempotent.
pub const COMUNA_NO_RECONOCIDA: &str = "Comuna no reconocida";

/// Defaults applied to malformed push events before validation
pub const SIN_NOMBRE: &str = "Sin nombre";
pub const SIN_COMUNA: &str = "Sin comuna";

/// Query marker that routes a scanning device to the form view
pub const SCAN_QUERY: &str = "?mode=scan";

/// Buffered insert events per subscriber before a slow SSE client lags
pub const EVENT_BUFFER: usize = 256;
