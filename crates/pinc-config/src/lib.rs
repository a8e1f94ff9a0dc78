//! Configuration management for pinc.
//!
//! Parses `pinc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Layout
//!
//! ```toml
//! [includes]
//! specifiers = ["styles", "/opt/plantuml/common.iuml"]
//! bundled_dir = "includes"
//!
//! [[folders]]
//! path = "services/billing"
//! specifiers = ["billing-styles"]
//! ```
//!
//! Without `[[folders]]` the config directory is the only workspace folder.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `includes.specifiers`
//! - `includes.bundled_dir`
//! - `folders.path`
//! - `folders.specifiers`

mod expand;

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the bundled includes directory.
    pub bundled_dir: Option<PathBuf>,
    /// Override the default include specifiers.
    pub specifiers: Option<Vec<String>>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "pinc.toml";

/// Default bundled includes directory, relative to the config directory.
const DEFAULT_BUNDLED_DIR: &str = "includes";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Include settings (paths are relative strings from TOML).
    includes: IncludesConfigRaw,
    /// Workspace folders (paths are relative strings from TOML).
    folders: Vec<FolderConfigRaw>,

    /// Resolved include settings (set after loading).
    #[serde(skip)]
    pub includes_resolved: IncludesConfig,
    /// Resolved workspace folders (set after loading).
    #[serde(skip)]
    pub folders_resolved: Vec<FolderConfig>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw include configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct IncludesConfigRaw {
    specifiers: Vec<String>,
    bundled_dir: Option<String>,
}

/// Resolved include configuration.
#[derive(Debug, Default)]
pub struct IncludesConfig {
    /// Include specifiers applied to folders without their own list.
    pub specifiers: Vec<String>,
    /// Root of the bundled `<name>.wsd` include library.
    pub bundled_dir: PathBuf,
}

/// Raw workspace folder entry as parsed from TOML.
#[derive(Debug, Deserialize)]
struct FolderConfigRaw {
    path: String,
    specifiers: Option<Vec<String>>,
}

/// Resolved workspace folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderConfig {
    /// Absolute folder root.
    pub root: PathBuf,
    /// Folder-scoped specifiers; `None` falls back to the defaults.
    pub specifiers: Option<Vec<String>>,
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
        /// Config field path (e.g., "`includes.bundled_dir`").
        field: String,
        /// Error message (e.g., "${`PLANTUML_HOME`} not set").
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

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `pinc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Specifiers that apply to a workspace folder.
    ///
    /// A configured folder with its own `specifiers` list uses it; any other
    /// folder, and `None` (documents outside every folder), uses the defaults.
    #[must_use]
    pub fn specifiers_for(&self, folder: Option<&Path>) -> &[String] {
        folder
            .and_then(|root| self.folders_resolved.iter().find(|f| f.root == root))
            .and_then(|f| f.specifiers.as_deref())
            .unwrap_or(self.includes_resolved.specifiers.as_slice())
    }

    /// Root of the deepest configured folder containing `document`.
    #[must_use]
    pub fn owning_folder(&self, document: &Path) -> Option<&Path> {
        self.folders_resolved
            .iter()
            .filter(|f| document.starts_with(&f.root))
            .max_by_key(|f| f.root.components().count())
            .map(|f| f.root.as_path())
    }

    /// Bundled includes directory.
    #[must_use]
    pub fn bundled_dir(&self) -> &Path {
        &self.includes_resolved.bundled_dir
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(bundled_dir) = &settings.bundled_dir {
            self.includes_resolved.bundled_dir.clone_from(bundled_dir);
        }
        if let Some(specifiers) = &settings.specifiers {
            self.includes_resolved.specifiers.clone_from(specifiers);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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
            includes: IncludesConfigRaw::default(),
            folders: Vec::new(),
            includes_resolved: IncludesConfig {
                specifiers: Vec::new(),
                bundled_dir: base.join(DEFAULT_BUNDLED_DIR),
            },
            folders_resolved: vec![FolderConfig {
                root: base.to_path_buf(),
                specifiers: None,
            }],
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    ///
    /// Resolved paths are absolute even when `path` is relative, so they
    /// compare against absolute document paths.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let path = std::path::absolute(path)?;
        let content = std::fs::read_to_string(&path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("/"));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.clone());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(
            &self.includes_resolved.bundled_dir.to_string_lossy(),
            "includes.bundled_dir",
        )?;

        let mut seen = HashSet::new();
        for folder in &self.folders_resolved {
            if !seen.insert(&folder.root) {
                return Err(ConfigError::Validation(format!(
                    "folders.path {} is declared more than once",
                    folder.root.display()
                )));
            }
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        for spec in &mut self.includes.specifiers {
            *spec = expand::expand_env(spec, "includes.specifiers")?;
        }
        if let Some(ref dir) = self.includes.bundled_dir {
            self.includes.bundled_dir = Some(expand::expand_env(dir, "includes.bundled_dir")?);
        }

        for folder in &mut self.folders {
            require_non_empty(&folder.path, "folders.path")?;
            folder.path = expand::expand_env(&folder.path, "folders.path")?;
            for spec in folder.specifiers.iter_mut().flatten() {
                *spec = expand::expand_env(spec, "folders.specifiers")?;
            }
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    ///
    /// Specifiers are kept verbatim: relative ones are resolved per folder at
    /// lookup time.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.includes_resolved = IncludesConfig {
            specifiers: self.includes.specifiers.clone(),
            bundled_dir: config_dir.join(
                self.includes
                    .bundled_dir
                    .as_deref()
                    .unwrap_or(DEFAULT_BUNDLED_DIR),
            ),
        };

        self.folders_resolved = if self.folders.is_empty() {
            vec![FolderConfig {
                root: config_dir.to_path_buf(),
                specifiers: None,
            }]
        } else {
            self.folders
                .iter()
                .map(|f| FolderConfig {
                    root: config_dir.join(&f.path),
                    specifiers: f.specifiers.clone(),
                })
                .collect()
        };
    }
}
