//! Tracing/logging (shared setup).

/// Tracing configuration (filters, formatters).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize human-readable logging on stderr.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::Text);
}

/// Initialize JSON logging on stderr.
pub fn init_json() {
    tracing::init(LogFormat::Json);
}
