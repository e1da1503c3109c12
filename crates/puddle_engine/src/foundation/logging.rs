//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Defaults to the `info` level; `RUST_LOG` overrides it as usual.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Initialize logging for unit tests
///
/// Safe to call from every test; repeated initialisation is ignored.
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
