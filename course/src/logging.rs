//! Diagnostic logging for `course` commands.
//!
//! Everything goes to stderr: stdout carries only the setup progress lines
//! and the tagged verdict line the grading tool parses.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when `RUST_LOG` is unset or unparsable.
const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the stderr subscriber, filtered by `RUST_LOG`.
///
/// `RUST_LOG=course=debug course test` shows the spawned test command,
/// its exit code, and any truncation of captured output.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
