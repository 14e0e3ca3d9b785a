use std::{path::PathBuf, time::Duration};

use log::warn;

pub const DEFAULT_DB_FILE: &str = "focuskit.sqlite3";
/// Same budget browsers give an origin's local storage.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_TICK_MS: u64 = 1_000;

/// Runtime configuration, resolved from `FOCUSKIT_*` environment variables over defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Overrides the platform app-data directory when set.
    pub data_dir: Option<PathBuf>,
    pub db_file_name: String,
    pub tick_interval: Duration,
    pub quota_bytes: usize,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            db_file_name: DEFAULT_DB_FILE.into(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            quota_bytes: DEFAULT_QUOTA_BYTES,
            debug: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("FOCUSKIT_DATA_DIR").filter(|value| !value.trim().is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(raw) = lookup("FOCUSKIT_TICK_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.tick_interval = Duration::from_millis(ms),
                _ => warn!("Ignoring invalid FOCUSKIT_TICK_MS value '{raw}'"),
            }
        }

        if let Some(raw) = lookup("FOCUSKIT_QUOTA_BYTES") {
            match raw.trim().parse::<usize>() {
                Ok(bytes) if bytes > 0 => config.quota_bytes = bytes,
                _ => warn!("Ignoring invalid FOCUSKIT_QUOTA_BYTES value '{raw}'"),
            }
        }

        config.debug = lookup("FOCUSKIT_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        config
    }

    /// Database location inside `app_data_dir` unless `FOCUSKIT_DATA_DIR` overrides it.
    pub fn db_path(&self, app_data_dir: PathBuf) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or(app_data_dir)
            .join(&self.db_file_name)
    }
}
