use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::SystemTime;

use tracing::{debug, warn};

use crate::config::parsing::split_key_value;
use crate::config::paths::resolve_settings_config_path;
use crate::config::types::{DEFAULT_HALF_LIFE_DAYS, Settings};
use crate::state::{SortMode, TrendingFormula};

/// Upper bound for the simulated latency.
const MAX_LATENCY_MS: u64 = 10_000;
/// Upper bound for list and tag limits.
const MAX_LIST_LIMIT: usize = 100;

/// Parsed settings together with the file mtime they were read at.
struct SettingsCache {
    settings: Settings,
    path: Option<PathBuf>,
    mtime: Option<SystemTime>,
    initialized: bool,
}

static SETTINGS_CACHE: OnceLock<Mutex<SettingsCache>> = OnceLock::new();

/// What: Load user settings from `settings.conf` under HOME/XDG.
///
/// Inputs:
/// - None (reads `settings.conf` if present)
///
/// Output:
/// - A `Settings` value; falls back to `Settings::default()` when missing or invalid.
///
/// Details:
/// - Parsed settings are cached until the resolved path or its modification time changes.
#[must_use]
pub fn settings() -> Settings {
    let mut cache = SETTINGS_CACHE
        .get_or_init(|| {
            Mutex::new(SettingsCache {
                settings: Settings::default(),
                path: None,
                mtime: None,
                initialized: false,
            })
        })
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    let settings_path = resolve_settings_config_path().or_else(|| {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| env::var("HOME").ok().map(|h| Path::new(&h).join(".config")))
            .map(|base| base.join("aiscout").join("settings.conf"))
    });
    let mtime = settings_path
        .as_ref()
        .and_then(|p| fs::metadata(p).and_then(|m| m.modified()).ok());

    if cache.initialized && cache.path == settings_path && cache.mtime == mtime {
        debug!("[Config] Using cached settings (unchanged file)");
        return cache.settings.clone();
    }

    let out = settings_path
        .as_deref()
        .map_or_else(Settings::default, load_settings_file);
    cache.path = settings_path;
    cache.mtime = mtime;
    cache.settings = out.clone();
    cache.initialized = true;
    out
}

/// What: Read and parse one settings file.
///
/// Inputs:
/// - `path`: Path to a `settings.conf`.
///
/// Output:
/// - Parsed and normalized settings; defaults when the file is unreadable.
#[must_use]
pub fn load_settings_file(path: &Path) -> Settings {
    let mut out = Settings::default();
    match fs::read_to_string(path) {
        Ok(content) => {
            debug!(path = %path.display(), bytes = content.len(), "[Config] Loaded settings.conf");
            parse_settings(&content, &mut out);
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "[Config] settings.conf missing or unreadable, using defaults"
            );
        }
    }
    normalize(&mut out);
    out
}

/// What: Apply `key = value` lines from settings.conf content.
///
/// Inputs:
/// - `content`: Content of the settings.conf file.
/// - `settings`: Settings to populate.
///
/// Details:
/// - Unknown keys are ignored; invalid values keep the previous value and log a warning.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    let mut decay_requested: Option<bool> = None;
    for line in content.lines() {
        let Some((key, val)) = split_key_value(line) else {
            continue;
        };
        match key.as_str() {
            "sort_mode" | "default_sort" | "sort" => match SortMode::from_config_key(val) {
                Some(sm) => settings.sort_mode = sm,
                None => warn!(value = val, "[Config] Unknown sort_mode, keeping default"),
            },
            "query_latency_ms" | "latency_ms" | "latency" => {
                if let Ok(v) = val.parse::<u64>() {
                    settings.query_latency_ms = v;
                }
            }
            "catalog_path" | "catalog" | "feed_path" => {
                settings.catalog_path = if val.is_empty() {
                    None
                } else {
                    Some(expand_home(val))
                };
            }
            "latest_limit" | "latest_count" => {
                if let Ok(v) = val.parse::<usize>() {
                    settings.latest_limit = v;
                }
            }
            "tag_display_limit" | "tags_shown" => {
                if let Ok(v) = val.parse::<usize>() {
                    settings.tag_display_limit = v;
                }
            }
            "trending_formula" | "trending" => match val.to_ascii_lowercase().as_str() {
                "legacy" | "default" => decay_requested = Some(false),
                "decay" | "half_life" | "halflife" => decay_requested = Some(true),
                _ => warn!(value = val, "[Config] Unknown trending_formula, keeping legacy"),
            },
            "trending_half_life_days" | "half_life_days" => {
                if let Ok(v) = val.parse::<f64>() {
                    settings.trending_half_life_days = v;
                }
            }
            _ => {}
        }
    }
    match decay_requested {
        Some(true) => {
            settings.trending_formula = TrendingFormula::Decay {
                half_life_days: settings.trending_half_life_days,
            };
        }
        Some(false) => settings.trending_formula = TrendingFormula::Legacy,
        None => {}
    }
}

/// What: Clamp parsed values into usable ranges.
///
/// Details:
/// - Latency is capped at ten seconds.
/// - `latest_limit` of 0 falls back to the default; both limits are capped.
/// - A non-positive or non-finite half-life falls back to the default.
pub fn normalize(settings: &mut Settings) {
    settings.query_latency_ms = settings.query_latency_ms.min(MAX_LATENCY_MS);
    if settings.latest_limit == 0 {
        settings.latest_limit = crate::config::types::DEFAULT_LATEST_LIMIT;
    }
    settings.latest_limit = settings.latest_limit.min(MAX_LIST_LIMIT);
    settings.tag_display_limit = settings.tag_display_limit.min(MAX_LIST_LIMIT);
    if !settings.trending_half_life_days.is_finite() || settings.trending_half_life_days <= 0.0 {
        settings.trending_half_life_days = DEFAULT_HALF_LIFE_DAYS;
    }
    if let TrendingFormula::Decay { half_life_days } = &mut settings.trending_formula {
        *half_life_days = settings.trending_half_life_days;
    }
}

/// Expand a leading `~/` to `$HOME/`.
fn expand_home(val: &str) -> PathBuf {
    if let Some(rest) = val.strip_prefix("~/")
        && let Ok(home) = env::var("HOME")
    {
        return Path::new(&home).join(rest);
    }
    PathBuf::from(val)
}
