//! Logger setup plus module-gated logging macros.
//!
//! A module opts into the macros by declaring its own switch:
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_debug, log_warn};
//!
//! log_warn!("stored document for {} is not valid JSON", key);
//! ```
//! Flipping the constant to `false` silences that module without touching
//! `RUST_LOG`, which is handy for the storage and ticker paths that log on
//! every mutation.

use log::LevelFilter;

use crate::config::AppConfig;

/// Initialize `env_logger`. `RUST_LOG` still wins over the configured default.
pub fn init_logging(config: &AppConfig) {
    let default_level = if config.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .try_init();
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Gated `warn!`. Storage read failures go through here.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Gated `error!`. Storage write failures go through here.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
