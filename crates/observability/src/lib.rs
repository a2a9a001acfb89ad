//! Tracing/logging setup shared by hosts and test suites.

/// Subscriber configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize process-wide logging (`LOG_FORMAT`, `RUST_LOG`, default `info`).
///
/// JSON unless `LOG_FORMAT=pretty`. Safe to call multiple times; subsequent
/// calls become no-ops.
pub fn init() {
    crate::tracing::init(LogFormat::from_env(), "info");
}

/// Logging for `cargo test`: human-readable, captured per test.
///
/// Defaults to `debug` so gate decisions show up in failing test output.
pub fn init_test() {
    crate::tracing::init_test("debug");
}
