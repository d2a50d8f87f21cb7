//! Logger setup for hosts embedding the tracker.

use env_logger::Env;

/// Install `env_logger` with an `info` default, overridable through
/// `RUST_LOG`. Calling this more than once is harmless.
pub fn init_logging() {
    let result = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();

    if result.is_ok() {
        log::debug!("Logging initialized");
    }
}
