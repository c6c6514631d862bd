//! Diagnostic logging
//!
//! Events go to stderr through `tracing-subscriber`, so they never interleave with
//! command output on stdout. The filter comes from `BITLOG_LOG` using the usual
//! `EnvFilter` directive syntax (`debug`, `bitlog::artifacts::log=trace`, ...).

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter
pub const LOG_ENV_VAR: &str = "BITLOG_LOG";

/// Install the global subscriber; calling it twice is harmless
///
/// Without `BITLOG_LOG` only warnings are shown, or debug events with `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init();
}
