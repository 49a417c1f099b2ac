//! Configuration for aiscout.
//!
//! Settings live in a `key = value` file at `~/.config/aiscout/settings.conf`
//! (or under `$XDG_CONFIG_HOME`). Logs are written next to it.

/// Configuration parsing utilities.
mod parsing;
/// Path resolution for config directories.
mod paths;
/// Settings loading, parsing, and caching.
mod settings;
/// Settings type definitions.
mod types;

pub use paths::{config_dir, logs_dir};
pub use settings::{load_settings_file, normalize, parse_settings, settings};
pub use types::{DEFAULT_HALF_LIFE_DAYS, DEFAULT_LATEST_LIMIT, DEFAULT_TAG_DISPLAY_LIMIT, Settings};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize tests that mutate `HOME`.
///
/// Output:
/// - Shared reference to a lazily-initialized `Mutex<()>`.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
