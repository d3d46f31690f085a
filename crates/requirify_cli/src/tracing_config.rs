//! Logging for the `requirify` binary.
//!
//! ```bash
//! REQUIRIFY_LOG=debug requirify dist/index.js
//! REQUIRIFY_LOG="requirify=trace,requirify_resolver=debug" requirify dist/index.js
//! ```
//!
//! Nothing is installed unless `REQUIRIFY_LOG` or `RUST_LOG` is set.

use tracing_subscriber::EnvFilter;

/// `REQUIRIFY_LOG` wins over `RUST_LOG` when both are set.
fn build_filter() -> EnvFilter {
  if let Ok(val) = std::env::var("REQUIRIFY_LOG") {
    EnvFilter::builder().parse_lossy(val)
  } else {
    EnvFilter::from_default_env()
  }
}

/// Output goes to stderr, stdout is reserved for the summary.
pub fn init_tracing() {
  if std::env::var("REQUIRIFY_LOG").is_err() && std::env::var("RUST_LOG").is_err() {
    return;
  }

  tracing_subscriber::fmt().with_env_filter(build_filter()).with_writer(std::io::stderr).init();
}
