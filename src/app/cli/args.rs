//! Command line arguments
//!
//! Global options apply to every subcommand and can also come from the TOML
//! configuration file. Settings resolution (manifest source, loader options,
//! normalizer) lives here so that startup only wires the pieces together.

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;

use super::config::{ConfigError, ConfigResult};
use crate::core::retry::RetryPolicy;
use crate::core::validation::validate_positive_int;
use crate::core::version::long_version;
use crate::manifest::loader::MIN_BAG_COLUMN;
use crate::manifest::{LoaderOptions, ManifestCache, ManifestFormat, ManifestSource};
use crate::scan::{CodeNormalizer, DEFAULT_STRIP_PREFIX};

#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "bagcheck")]
#[command(about = "Check scanned bag tags against flight manifests")]
#[command(version, long_version = long_version())]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Manifest file (CSV, TSV or JSON)
    #[arg(
        short = 'm',
        long = "manifest",
        value_name = "FILE",
        global = true,
        conflicts_with = "manifest_url"
    )]
    pub manifest: Option<PathBuf>,

    /// URL of the published manifest sheet (JSON)
    #[arg(short = 'u', long = "manifest-url", value_name = "URL", global = true)]
    pub manifest_url: Option<String>,

    /// Manifest file format (detected when omitted)
    #[arg(long = "manifest-format", value_name = "FORMAT", value_parser = ["delimited", "json"], global = true)]
    pub manifest_format: Option<String>,

    /// Zero-based column where bag codes start in delimited manifests (default 5, column F)
    #[arg(long = "bag-column", value_name = "INDEX", value_parser = parse_bag_column, global = true)]
    pub bag_column: Option<usize>,

    /// Directory for the offline manifest copy
    #[arg(long = "cache-dir", value_name = "DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Do not read or write the offline manifest copy
    #[arg(long = "no-cache", global = true)]
    pub no_cache: bool,

    /// Pattern stripped from the start of scanned codes ('none' to disable)
    #[arg(long = "strip-prefix", value_name = "PATTERN", global = true)]
    pub strip_prefix: Option<String>,

    /// Attempts for the remote manifest fetch
    #[arg(long = "retry-attempts", value_name = "COUNT", value_parser = validate_positive_int, global = true)]
    pub retry_attempts: Option<usize>,

    /// Force colored output
    #[arg(short = 'g', long = "color", overrides_with = "no_color", global = true)]
    pub color: bool,

    /// Disable colored output
    #[arg(short = 'n', long = "no-color", overrides_with = "color", global = true)]
    pub no_color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"], global = true)]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"], global = true)]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List flights in the manifest, optionally only those on one date
    Flights {
        /// Date (YYYY-MM-DD or DD/MM/YYYY)
        date: Option<String>,
    },
    /// Classify bag codes against a flight (codes from arguments or stdin)
    Check {
        /// Flight date
        #[arg(short = 'd', long = "date")]
        date: String,
        /// Flight number
        #[arg(short = 'F', long = "flight")]
        flight: String,
        /// Bag codes; read one per line from stdin when omitted
        codes: Vec<String>,
    },
    /// Interactive scanning console (default)
    Scan {
        /// Flight date to select on start
        #[arg(short = 'd', long = "date", requires = "flight")]
        date: Option<String>,
        /// Flight number to select on start
        #[arg(short = 'F', long = "flight", requires = "date")]
        flight: Option<String>,
    },
}

fn parse_bag_column(value: &str) -> Result<usize, String> {
    let column = value
        .parse::<usize>()
        .map_err(|_| format!("'{}' is not a valid column index", value))?;
    if column < MIN_BAG_COLUMN {
        return Err(format!(
            "Bag column must be at least {} (columns A-D hold date, flight, loader and total)",
            MIN_BAG_COLUMN
        ));
    }
    Ok(column)
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subcommand to run; the scanning console when none is given
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Scan {
            date: None,
            flight: None,
        })
    }

    /// Explicit color choice, `None` when left to terminal detection
    pub fn color_override(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Whether output should be colored
    pub fn color_enabled(&self) -> bool {
        self.color_override()
            .unwrap_or_else(|| std::io::stdout().is_terminal())
    }

    /// Where to load the manifest from
    pub fn manifest_source(&self) -> ConfigResult<ManifestSource> {
        if let Some(path) = &self.manifest {
            return Ok(ManifestSource::File(path.clone()));
        }
        if let Some(url) = &self.manifest_url {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    key: "manifest-url".to_string(),
                    message: format!("'{}' is not an http(s) URL", url),
                });
            }
            return Ok(ManifestSource::Remote(url.to_string()));
        }
        Err(ConfigError::Invalid {
            key: "manifest".to_string(),
            message: "No manifest configured. Use --manifest FILE or --manifest-url URL"
                .to_string(),
        })
    }

    /// Loader settings from the resolved arguments
    pub fn loader_options(&self) -> ConfigResult<LoaderOptions> {
        let mut options = LoaderOptions::default();

        if let Some(column) = self.bag_column {
            options.bag_column = column;
        }
        if let Some(attempts) = self.retry_attempts {
            options.retry = RetryPolicy::with_attempts(attempts);
        }
        if let Some(format) = &self.manifest_format {
            let format = ManifestFormat::from_str(format).map_err(|_| ConfigError::Invalid {
                key: "manifest-format".to_string(),
                message: format!("Unknown manifest format '{}' (use delimited or json)", format),
            })?;
            options.format = Some(format);
        }
        if !self.no_cache {
            options.cache = self
                .cache_dir
                .clone()
                .or_else(ManifestCache::default_dir)
                .map(ManifestCache::new);
        }

        Ok(options)
    }

    /// Normalizer for scanned codes
    pub fn code_normalizer(&self) -> ConfigResult<CodeNormalizer> {
        let pattern = self.strip_prefix.as_deref().unwrap_or(DEFAULT_STRIP_PREFIX);
        CodeNormalizer::from_setting(pattern).map_err(|e| ConfigError::Invalid {
            key: "strip-prefix".to_string(),
            message: format!("Invalid strip-prefix pattern '{}': {}", pattern, e),
        })
    }

    /// Log file as a string, `None` when disabled
    pub fn log_file_path(&self) -> Option<String> {
        self.log_file
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
            .filter(|p| !(p.eq_ignore_ascii_case("none") || p == "-"))
    }
}
