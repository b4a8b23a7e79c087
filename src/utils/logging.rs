//! Logging setup plus conditional macros gated by a module-level `ENABLE_LOGS` flag.
//!
//! Usage:
//! ```ignore
//! // In your module, define the flag first:
//! const ENABLE_LOGS: bool = true;
//!
//! // Then use the macros (they're exported at the crate root):
//! use crate::{log_info, log_warn};
//!
//! log_info!("This will log if ENABLE_LOGS is true");
//! ```

use env_logger::{Builder, Env};

/// Initialize `env_logger` from `RUST_LOG`, falling back to info.
///
/// Safe to call more than once; later calls are ignored so tests and embedding
/// shells can both call it.
pub fn init_logging() {
    let _ = logger_from(Env::default().default_filter_or("info")).try_init();
}

fn logger_from(env: Env<'_>) -> Builder {
    Builder::from_env(env)
}

/// Macro for conditional debug logging.
/// Checks the `ENABLE_LOGS` const in the calling module.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

/// Macro for conditional info logging.
/// Checks the `ENABLE_LOGS` const in the calling module.
///
/// Each module that uses this macro must define:
/// ```ignore
/// const ENABLE_LOGS: bool = true; // or false
/// ```
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Macro for conditional warn logging.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Macro for conditional error logging.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn filter_comes_from_the_environment() {
        std::env::set_var("CHOLOCK_TEST_LOG_SET", "debug");
        let logger = logger_from(Env::new().filter_or("CHOLOCK_TEST_LOG_SET", "info")).build();
        assert_eq!(logger.filter(), LevelFilter::Debug);

        std::env::set_var("CHOLOCK_TEST_LOG_QUIET", "warn");
        let logger = logger_from(Env::new().filter_or("CHOLOCK_TEST_LOG_QUIET", "info")).build();
        assert_eq!(logger.filter(), LevelFilter::Warn);
    }

    #[test]
    fn filter_defaults_to_info() {
        let logger = logger_from(Env::new().filter_or("CHOLOCK_TEST_LOG_UNSET", "info")).build();
        assert_eq!(logger.filter(), LevelFilter::Info);
    }
}
