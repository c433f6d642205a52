//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the readiness tracing/logging system.
///
/// Reads the `READINESS_LOG` environment variable for per-module log levels.
/// Format: `READINESS_LOG=readiness_engine::gateway=debug,readiness_engine=info`
///
/// Falls back to `readiness=info` if `READINESS_LOG` is not set or is invalid.
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("READINESS_LOG")
            .unwrap_or_else(|_| EnvFilter::new("readiness=info"));

        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
