//! Conditional logging macros that check a module-level `ENABLE_LOGS` flag.
//!
//! Each module that uses these defines its own flag:
//! ```rust
//! const ENABLE_LOGS: bool = true;
//! ```
//! and then uses the macros (exported at the crate root):
//! ```rust,ignore
//! use crate::{log_error, log_info, log_warn};
//!
//! log_info!("logged only when ENABLE_LOGS is true");
//! ```

/// Opt-in logger setup for binaries and tests (reads RUST_LOG env var).
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}

/// Conditional info logging, gated on the calling module's `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Conditional warn logging, gated on the calling module's `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Conditional error logging, gated on the calling module's `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
