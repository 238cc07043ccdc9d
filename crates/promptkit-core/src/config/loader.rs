//! Config loader — reads `~/.promptkit/config.json`, merges env vars, and
//! applies legacy migrations.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.promptkit/config.json`
//! 3. Environment variables `PROMPTKIT_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;
use crate::template::SubstitutionMode;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let mut raw: serde_json::Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    migrate_config(&mut raw);

    let config: Config = match serde_json::from_value(raw) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to deserialize config: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply legacy config migrations.
///
/// Moves `template.sequential: bool` → `template.mode`.
fn migrate_config(raw: &mut serde_json::Value) {
    let Some(template) = raw.get_mut("template").and_then(|t| t.as_object_mut()) else {
        return;
    };
    if let Some(sequential) = template.remove("sequential") {
        if !template.contains_key("mode") {
            let mode = if sequential.as_bool().unwrap_or(false) {
                SubstitutionMode::Sequential
            } else {
                SubstitutionMode::Simultaneous
            };
            template.insert("mode".to_string(), mode.as_str().into());
            debug!("Migrated template.sequential → template.mode = {}", mode);
        }
    }
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `PROMPTKIT_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `PROMPTKIT_TEMPLATE__MODE` → `template.mode`
/// - `PROMPTKIT_TEMPLATE__STRICT` → `template.strict`
/// - `PROMPTKIT_TEMPLATE__STRIP_COMMENTS` → `template.strip_comments`
/// - `PROMPTKIT_TEMPLATE__TEMPLATE_DIR` → `template.template_dir`
/// - `PROMPTKIT_MEDIA__FALLBACK_MIME` → `media.fallback_mime`
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("PROMPTKIT_TEMPLATE__MODE") {
        match val.parse::<SubstitutionMode>() {
            Ok(mode) => config.template.mode = mode,
            Err(e) => warn!("Ignoring PROMPTKIT_TEMPLATE__MODE: {}", e),
        }
    }
    if let Ok(val) = std::env::var("PROMPTKIT_TEMPLATE__STRICT") {
        apply_bool(&mut config.template.strict, "PROMPTKIT_TEMPLATE__STRICT", &val);
    }
    if let Ok(val) = std::env::var("PROMPTKIT_TEMPLATE__STRIP_COMMENTS") {
        apply_bool(
            &mut config.template.strip_comments,
            "PROMPTKIT_TEMPLATE__STRIP_COMMENTS",
            &val,
        );
    }
    if let Ok(val) = std::env::var("PROMPTKIT_TEMPLATE__TEMPLATE_DIR") {
        config.template.template_dir = val;
    }
    if let Ok(val) = std::env::var("PROMPTKIT_MEDIA__FALLBACK_MIME") {
        config.media.fallback_mime = val;
    }

    config
}

/// Accepts `true`/`false`/`1`/`0`; anything else is logged and ignored.
fn apply_bool(target: &mut bool, name: &str, val: &str) {
    match val {
        "true" | "1" => *target = true,
        "false" | "0" => *target = false,
        other => warn!("Ignoring {}: expected a boolean, got '{}'", name, other),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
