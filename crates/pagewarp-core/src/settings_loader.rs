//! Settings loading from configuration files.
//!
//! This module provides functions to load [`Settings`] from TOML files, JSON
//! files, and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `PAGEWARP_DEBUG` | `debug` |
//! | `PAGEWARP_LOG_LEVEL` | `log_level` |
//! | `PAGEWARP_MATCH_SENSITIVE` | `match_options.sensitive` |
//! | `PAGEWARP_MATCH_STRICT` | `match_options.strict` |
//! | `PAGEWARP_MATCH_DELIMITER` | `match_options.delimiter` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use pagewarp_core::settings_loader;
//!
//! // Load from TOML
//! let settings = settings_loader::from_toml_file("config/pagewarp.toml").unwrap();
//!
//! // Load from JSON with environment overrides
//! let settings = settings_loader::from_json_file_with_env("config/pagewarp.json").unwrap();
//! ```

use std::path::Path;

use crate::error::PagewarpError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values, including
/// individual fields inside the `[match_options]` table.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, PagewarpError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| PagewarpError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, PagewarpError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        PagewarpError::ConfigurationError(format!(
            "Failed to read TOML file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, PagewarpError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, PagewarpError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| PagewarpError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, PagewarpError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        PagewarpError::ConfigurationError(format!(
            "Failed to read JSON file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_json_str(&content)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, PagewarpError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// Boolean variables accept "true", "1" and "yes" (case-insensitive) as true;
/// anything else is false. An empty `PAGEWARP_MATCH_DELIMITER` is ignored.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("PAGEWARP_DEBUG") {
        settings.debug = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("PAGEWARP_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("PAGEWARP_MATCH_SENSITIVE") {
        settings.match_options.sensitive = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("PAGEWARP_MATCH_STRICT") {
        settings.match_options.strict = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("PAGEWARP_MATCH_DELIMITER") {
        if !val.is_empty() {
            settings.match_options.delimiter = val;
        }
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_bool(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

/// Deep-merges `value` over the serialized defaults and deserializes the result.
fn merge_over_defaults(value: serde_json::Value, format: &str) -> Result<Settings, PagewarpError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        PagewarpError::SerializationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        PagewarpError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests that touch process environment must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = true
            log_level = "debug"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(settings.debug);
        assert_eq!(settings.log_level, "debug");
        // Defaults preserved
        assert!(settings.match_options.end);
    }

    #[test]
    fn test_from_toml_str_match_options_partial() {
        let toml = r#"
            [match_options]
            sensitive = true
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(settings.match_options.sensitive);
        assert!(!settings.match_options.strict);
        assert_eq!(settings.match_options.delimiter, "/#?");
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("[[invalid toml content");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str("debug = \"definitely\"");
        assert!(matches!(result, Err(PagewarpError::ConfigurationError(_))));
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{
            "log_level": "warn",
            "match_options": { "strict": true, "delimiter": "/" }
        }"#;

        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.log_level, "warn");
        assert!(settings.match_options.strict);
        assert_eq!(settings.match_options.delimiter, "/");
        // Defaults preserved
        assert!(!settings.debug);
        assert!(settings.match_options.decode);
    }

    #[test]
    fn test_from_json_str_empty_object() {
        let settings = from_json_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_json_str_invalid() {
        let result = from_json_str("{invalid json");
        assert!(result.is_err());
    }

    // ── File loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_file() {
        let dir = std::env::temp_dir().join("pagewarp_test_toml");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pagewarp.toml");

        std::fs::write(&path, "log_level = \"trace\"\n").unwrap();

        let settings = from_toml_file(&path).unwrap();
        assert_eq!(settings.log_level, "trace");

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    #[test]
    fn test_from_json_file() {
        let dir = std::env::temp_dir().join("pagewarp_test_json");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pagewarp.json");

        std::fs::write(&path, r#"{"debug": true}"#).unwrap();

        let settings = from_json_file(&path).unwrap();
        assert!(settings.debug);

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    #[test]
    fn test_from_toml_file_missing() {
        let result = from_toml_file("/nonexistent/path/pagewarp.toml");
        assert!(matches!(result, Err(PagewarpError::ConfigurationError(_))));
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = from_json_file("/nonexistent/path/pagewarp.json");
        assert!(result.is_err());
    }

    // ── Environment variable overrides ──────────────────────────────

    #[test]
    fn test_apply_env_overrides_debug() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut settings = Settings::default();
        std::env::set_var("PAGEWARP_DEBUG", "yes");
        apply_env_overrides(&mut settings);
        assert!(settings.debug);

        std::env::set_var("PAGEWARP_DEBUG", "off");
        apply_env_overrides(&mut settings);
        assert!(!settings.debug);
        std::env::remove_var("PAGEWARP_DEBUG");
    }

    #[test]
    fn test_apply_env_overrides_match_options() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut settings = Settings::default();
        std::env::set_var("PAGEWARP_MATCH_SENSITIVE", "1");
        std::env::set_var("PAGEWARP_MATCH_STRICT", "TRUE");
        std::env::set_var("PAGEWARP_MATCH_DELIMITER", "/");
        apply_env_overrides(&mut settings);
        assert!(settings.match_options.sensitive);
        assert!(settings.match_options.strict);
        assert_eq!(settings.match_options.delimiter, "/");
        std::env::remove_var("PAGEWARP_MATCH_SENSITIVE");
        std::env::remove_var("PAGEWARP_MATCH_STRICT");
        std::env::remove_var("PAGEWARP_MATCH_DELIMITER");
    }

    #[test]
    fn test_apply_env_overrides_empty_delimiter_ignored() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut settings = Settings::default();
        std::env::set_var("PAGEWARP_MATCH_DELIMITER", "");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.match_options.delimiter, "/#?");
        std::env::remove_var("PAGEWARP_MATCH_DELIMITER");
    }

    #[test]
    fn test_toml_with_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = std::env::temp_dir().join("pagewarp_test_toml_env");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pagewarp_env.toml");

        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();

        std::env::set_var("PAGEWARP_LOG_LEVEL", "error");
        let settings = from_toml_file_with_env(&path).unwrap();
        assert_eq!(settings.log_level, "error");

        std::env::remove_var("PAGEWARP_LOG_LEVEL");
        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    // ── merge_json helper ───────────────────────────────────────────

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"outer": {"a": 1, "b": 2}});
        let over = serde_json::json!({"outer": {"b": 3}});
        let merged = merge_json(base, over);
        assert_eq!(merged["outer"]["a"], 1);
        assert_eq!(merged["outer"]["b"], 3);
    }

    #[test]
    fn test_toml_to_json() {
        let toml_val: toml::Value = toml::from_str(
            r#"
            name = "test"
            count = 42
            flag = true
            [nested]
            key = "value"
        "#,
        )
        .unwrap();

        let json = toml_to_json(toml_val);
        assert_eq!(json["name"], "test");
        assert_eq!(json["count"], 42);
        assert_eq!(json["flag"], true);
        assert_eq!(json["nested"]["key"], "value");
    }
}
