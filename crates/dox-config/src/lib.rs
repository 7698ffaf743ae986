//! Configuration management for dox.
//!
//! Parses `dox.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `html.output_dir`
//! - `diagrams.kroki_url`
//! - every value in `[tags]`

mod expand;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "dox.toml";

/// Image formats Kroki's Graphviz endpoint produces that `<img>` can embed.
pub const IMAGE_FORMATS: &[&str] = &["png", "svg", "jpeg"];

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTML output configuration (paths are relative strings from TOML).
    html: HtmlConfigRaw,
    /// Diagram rendering configuration (optional section).
    /// When present, `kroki_url` is required.
    diagrams: Option<DiagramsConfigRaw>,
    /// External documentation scopes mapped to their base URLs.
    pub tags: BTreeMap<String, String>,

    /// Resolved HTML configuration (set after loading).
    #[serde(skip)]
    pub html_resolved: HtmlConfig,
    /// Resolved diagrams configuration, `None` when diagrams are disabled.
    #[serde(skip)]
    pub diagrams_resolved: Option<DiagramsConfig>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    #[allow(clippy::derivable_impls)]
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw HTML configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct HtmlConfigRaw {
    output_dir: Option<String>,
    file_extension: Option<String>,
    dot_image_format: Option<String>,
}

/// Resolved HTML output configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlConfig {
    /// Directory generated pages and diagram images are written to.
    pub output_dir: PathBuf,
    /// Extension of generated pages, including the leading dot.
    pub file_extension: String,
    /// Image format of rendered diagrams.
    pub dot_image_format: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("html"),
            file_extension: ".html".to_owned(),
            dot_image_format: "png".to_owned(),
        }
    }
}

/// Raw diagrams configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DiagramsConfigRaw {
    kroki_url: Option<String>,
    timeout_secs: Option<u64>,
}

/// Resolved diagram rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramsConfig {
    /// Kroki server URL for diagram rendering.
    pub kroki_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl DiagramsConfig {
    /// Per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`diagrams.kroki_url`").
        field: String,
        /// Error message (e.g., "${`KROKI_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `dox.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// a value is invalid.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)
        } else {
            Ok(Self::default_with_cwd())
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            html: HtmlConfigRaw::default(),
            diagrams: None,
            tags: BTreeMap::new(),
            html_resolved: HtmlConfig {
                output_dir: base.join("html"),
                ..HtmlConfig::default()
            },
            diagrams_resolved: None,
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_html()?;
        self.validate_diagrams()?;
        self.validate_tags()?;
        Ok(())
    }

    fn validate_html(&self) -> Result<(), ConfigError> {
        let html = &self.html_resolved;
        require_non_empty(&html.file_extension, "html.file_extension")?;
        if !html.file_extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "html.file_extension must start with '.'".to_owned(),
            ));
        }
        if !IMAGE_FORMATS.contains(&html.dot_image_format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "html.dot_image_format must be one of {}",
                IMAGE_FORMATS.join(", ")
            )));
        }
        Ok(())
    }

    fn validate_diagrams(&self) -> Result<(), ConfigError> {
        let Some(diagrams) = &self.diagrams_resolved else {
            return Ok(());
        };
        require_non_empty(&diagrams.kroki_url, "diagrams.kroki_url")?;
        require_http_url(&diagrams.kroki_url, "diagrams.kroki_url")?;
        if diagrams.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "diagrams.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_tags(&self) -> Result<(), ConfigError> {
        for (scope, base_url) in &self.tags {
            require_non_empty(scope, "tags")?;
            require_non_empty(base_url, &format!("tags.{scope}"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.html.output_dir {
            self.html.output_dir = Some(expand::expand_env(dir, "html.output_dir")?);
        }

        if let Some(ref mut diagrams) = self.diagrams
            && let Some(ref url) = diagrams.kroki_url
        {
            diagrams.kroki_url = Some(expand::expand_env(url, "diagrams.kroki_url")?);
        }

        for (scope, base_url) in &mut self.tags {
            *base_url = expand::expand_env(base_url, &format!("tags.{scope}"))?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory and fill defaults.
    ///
    /// Validates that `kroki_url` is provided when `[diagrams]` section exists.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let defaults = HtmlConfig::default();
        self.html_resolved = HtmlConfig {
            output_dir: config_dir.join(self.html.output_dir.as_deref().unwrap_or("html")),
            file_extension: self
                .html
                .file_extension
                .clone()
                .unwrap_or(defaults.file_extension),
            dot_image_format: self
                .html
                .dot_image_format
                .clone()
                .unwrap_or(defaults.dot_image_format),
        };

        self.diagrams_resolved = match &self.diagrams {
            Some(diagrams) => {
                let kroki_url = diagrams.kroki_url.clone().ok_or_else(|| {
                    ConfigError::Validation(
                        "[diagrams] section requires kroki_url to be set".to_owned(),
                    )
                })?;
                Some(DiagramsConfig {
                    kroki_url,
                    timeout_secs: diagrams.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
                })
            }
            None => None,
        };

        Ok(())
    }
}
