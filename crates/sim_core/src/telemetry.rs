//! Logging bootstrap for binaries and tests. Metrics macros are emitted
//! inline at their call sites; installing a recorder is the embedder's job.

use std::sync::Once;

static INIT: Once = Once::new();

/// Idempotent env_logger init honoring `RUST_LOG` (default `info`).
pub fn init() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("info"),
        )
        .try_init();
    });
}
