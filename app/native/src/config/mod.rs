//! Configuration module for Foresight.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.
//!
//! There is no global configuration instance: the host loads a
//! [`ForesightConfig`] once and hands it to [`crate::extension::Extension`].

pub mod types;

use std::path::{Path, PathBuf};

pub use types::{
    AnimationTimings, ConfigError, ForesightConfig, TemporaryFilter, TemporaryWindowRule,
    WindowAddedPolicy, config_paths, load_config, load_config_from_path,
};

/// Loads the configuration, falling back to defaults when no file exists.
///
/// When `custom_path` is given it must exist; otherwise the standard search
/// paths are tried in order.
///
/// Returns the configuration and the path it was read from, if any.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a configuration file exists but cannot be
/// read or parsed.
pub fn load(custom_path: Option<&Path>) -> Result<(ForesightConfig, Option<PathBuf>), ConfigError> {
    if let Some(path) = custom_path {
        let config = load_config_from_path(path)?;
        tracing::debug!(path = %path.display(), "foresight: loaded configuration");
        return Ok((config, Some(path.to_path_buf())));
    }

    match load_config() {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "foresight: loaded configuration");
            Ok((config, Some(path)))
        }
        Err(ConfigError::NotFound) => {
            tracing::debug!("foresight: no configuration file found, using defaults");
            Ok((ForesightConfig::default(), None))
        }
        Err(err) => Err(err),
    }
}

/// Returns the JSON schema of the configuration file.
#[must_use]
pub fn schema() -> serde_json::Value {
    let schema = schemars::schema_for!(ForesightConfig);
    serde_json::to_value(schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_custom_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "keepFirstWorkspaceQuiet": true }"#).unwrap();

        let (config, path) = load(Some(file.path())).unwrap();

        assert!(config.keep_first_workspace_quiet);
        assert_eq!(path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_load_custom_path_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(Some(&dir.path().join("missing.jsonc")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_schema_describes_fields() {
        let schema = schema().to_string();
        assert!(schema.contains("overviewView"));
        assert!(schema.contains("temporaryWindows"));
        assert!(schema.contains("windowAddedPolicy"));
    }
}
