//! Diagnostic tracing for `icongen`.
//!
//! # Separation of Concerns
//!
//! - **Status line (`main`)**: exactly one line on stdout per run (success,
//!   conversion failure, or missing tool). Always printed, unaffected by `RUST_LOG`.
//!
//! - **Tracing (this module)**: spawn/exit details, timeouts, and rasterizer
//!   warnings on stderr, filtered by `RUST_LOG`. Never mixed into stdout, so
//!   scripts can read the status line alone.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber.
///
/// `RUST_LOG` selects verbosity; unset means `warn`, which still surfaces
/// timeouts and anything the rasterizer wrote to stderr.
///
/// # Example
/// ```bash
/// RUST_LOG=icongen=debug icongen --root .
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
