use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".hanfix.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub terms_file: Option<PathBuf>,

    #[serde(default = "default_use_builtin")]
    pub use_builtin: bool,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_use_builtin() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    vec!["txt".to_string(), "md".to_string()]
}

/// One on-disk config layer. Keys a file leaves out stay `None` and do not
/// override earlier layers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub terms_file: Option<PathBuf>,

    #[serde(default)]
    pub use_builtin: Option<bool>,

    #[serde(default)]
    pub extensions: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            terms_file: None,
            use_builtin: default_use_builtin(),
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(terms_file: Option<PathBuf>, no_builtin: bool) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                log::debug!("Loading global config from {}", global_path.display());
                config = config.merge(Self::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            log::debug!("Loading local config from {}", local_path.display());
            config = config.merge(Self::from_file(&local_path)?);
        }

        if let Some(path) = terms_file {
            config.terms_file = Some(path);
        }
        if no_builtin {
            config.use_builtin = false;
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<ConfigFile> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: ConfigFile) -> Self {
        if other.terms_file.is_some() {
            self.terms_file = other.terms_file;
        }
        if let Some(use_builtin) = other.use_builtin {
            self.use_builtin = use_builtin;
        }
        match other.extensions {
            Some(extensions) if !extensions.is_empty() => self.extensions = extensions,
            _ => {}
        }
        self
    }

    /// Term list location: configured file, else the per-user default.
    pub fn terms_path(&self) -> Result<PathBuf> {
        self.terms_file
            .clone()
            .or_else(Self::default_terms_path)
            .context("Failed to determine term list location")
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "hanfix").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_terms_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "hanfix").map(|dirs| dirs.config_dir().join("terms.toml"))
    }
}
