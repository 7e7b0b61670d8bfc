use frost_types::FrostError;
use frost_types::settings::AuditLevel;

/// Log an enforcement denial at the configured level and hand the error back.
pub(crate) fn deny(level: AuditLevel, err: FrostError) -> FrostError {
    match level {
        AuditLevel::Warn => tracing::warn!(kind = err.kind(), "Denied: {err}"),
        AuditLevel::Debug => tracing::debug!(kind = err.kind(), "Denied: {err}"),
        AuditLevel::Off => {}
    }
    err
}
