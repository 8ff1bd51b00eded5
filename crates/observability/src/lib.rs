//! Process-wide logging setup shared by the binaries.

pub mod tracing;

pub use crate::tracing::{LogFormat, LogSettings};

/// Install the JSON subscriber with `RUST_LOG` filtering (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    crate::tracing::init(&LogSettings::default());
}
