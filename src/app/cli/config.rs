//! TOML configuration file loading
//!
//! Values from the file fill in whatever the command line left unset, so the
//! command line always wins.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::args::Args;
use crate::core::error_handling::ContextualError;
use crate::manifest::loader::MIN_BAG_COLUMN;
use crate::manifest::ManifestFormat;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: &[&str] = &["text", "ext", "json"];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist
    #[error("The specified configuration file does not exist: {path}")]
    Missing { path: String },

    #[error("Error reading configuration file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Error parsing configuration file {path}: {message}")]
    Parse { path: String, message: String },

    /// A setting has an unusable value
    #[error("Invalid value for '{key}': {message}")]
    Invalid { key: String, message: String },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ConfigError::Invalid { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { message, .. } => Some(message),
            _ => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default configuration file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Bagcheck").join("bagcheck.toml"))
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        message: message.into(),
    }
}

fn string_value<'a>(config: &'a toml::Table, key: &str) -> ConfigResult<Option<&'a str>> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or_else(|| invalid(key, format!("'{}' must be a string", key))),
    }
}

fn bool_value(config: &toml::Table, key: &str) -> ConfigResult<Option<bool>> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| invalid(key, format!("'{}' must be true or false", key))),
    }
}

fn integer_value(config: &toml::Table, key: &str, minimum: i64) -> ConfigResult<Option<usize>> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => match value.as_integer() {
            Some(n) if n >= minimum => Ok(Some(n as usize)),
            _ => Err(invalid(
                key,
                format!("'{}' must be an integer of at least {}", key, minimum),
            )),
        },
    }
}

fn one_of(key: &str, value: &str, allowed: &[&str]) -> ConfigResult<String> {
    if allowed.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(invalid(
            key,
            format!("'{}' must be one of {}", key, allowed.join(", ")),
        ))
    }
}

impl Args {
    /// Load the configuration file into the arguments
    ///
    /// An explicit `--config-file` must exist; the default file is optional.
    /// Returns the path that was loaded, if any.
    pub async fn load_config_file(&mut self) -> ConfigResult<Option<PathBuf>> {
        let path = match &self.config_file {
            Some(path) if !path.exists() => {
                return Err(ConfigError::Missing {
                    path: path.display().to_string(),
                })
            }
            Some(path) => path.clone(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(None),
            },
        };

        let config = read_config_table(&path).await?;
        Self::apply_toml_values(self, &config)?;
        Ok(Some(path))
    }

    /// Apply TOML configuration values to Args without overriding values already set
    pub fn apply_toml_values(args: &mut Self, config: &toml::Table) -> ConfigResult<()> {
        if args.manifest.is_none() && args.manifest_url.is_none() {
            if let Some(manifest) = string_value(config, "manifest")? {
                args.manifest = Some(PathBuf::from(manifest));
            } else if let Some(url) = string_value(config, "manifest-url")? {
                args.manifest_url = Some(url.to_string());
            }
        }
        if let Some(format) = string_value(config, "manifest-format")? {
            ManifestFormat::from_str(format).map_err(|_| {
                invalid(
                    "manifest-format",
                    "'manifest-format' must be delimited or json",
                )
            })?;
            args.manifest_format.get_or_insert_with(|| format.to_ascii_lowercase());
        }
        if let Some(column) = integer_value(config, "bag-column", MIN_BAG_COLUMN as i64)? {
            args.bag_column.get_or_insert(column);
        }
        if let Some(dir) = string_value(config, "cache-dir")? {
            args.cache_dir.get_or_insert_with(|| PathBuf::from(dir));
        }
        if let Some(no_cache) = bool_value(config, "no-cache")? {
            args.no_cache = args.no_cache || no_cache;
        }
        if let Some(prefix) = string_value(config, "strip-prefix")? {
            args.strip_prefix.get_or_insert_with(|| prefix.to_string());
        }
        if let Some(attempts) = integer_value(config, "retry-attempts", 1)? {
            args.retry_attempts.get_or_insert(attempts);
        }
        if let Some(color) = bool_value(config, "color")? {
            if args.color_override().is_none() {
                args.color = color;
                args.no_color = !color;
            }
        }
        if let Some(level) = string_value(config, "log-level")? {
            let level = one_of("log-level", level, LOG_LEVELS)?;
            args.log_level.get_or_insert(level);
        }
        if let Some(file) = string_value(config, "log-file")? {
            args.log_file.get_or_insert_with(|| PathBuf::from(file));
        }
        if let Some(format) = string_value(config, "log-format")? {
            let format = one_of("log-format", format, LOG_FORMATS)?;
            args.log_format.get_or_insert(format);
        }
        Ok(())
    }
}

async fn read_config_table(path: &Path) -> ConfigResult<toml::Table> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    toml::from_str::<toml::Table>(&contents).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
