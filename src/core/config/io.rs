use crate::core::config::data::{path_display, Config};
use directories::ProjectDirs;
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Errors that can occur when loading or saving configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The platform offers no configuration directory (e.g., no home directory).
    NoConfigDir,

    /// Failed to read the configuration file from disk.
    Read {
        /// Path to the configuration file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the configuration file as valid TOML.
    Parse {
        /// Path to the configuration file with invalid TOML.
        path: PathBuf,
        /// The TOML deserialization error.
        source: toml::de::Error,
    },

    /// Failed to serialize or atomically replace the configuration file.
    Write {
        path: PathBuf,
        source: Box<dyn StdError + Send + Sync>,
    },

    /// No usable credential: the file still holds the placeholder, the key is
    /// empty, and the environment does not provide one.
    MissingCredential {
        /// File the user is expected to edit.
        path: PathBuf,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoConfigDir => {
                write!(f, "Failed to determine a configuration directory")
            }
            ConfigError::Read { path, source } => {
                write!(
                    f,
                    "Failed to read config at {}: {}",
                    path_display(path),
                    source
                )
            }
            ConfigError::Parse { path, source } => {
                write!(
                    f,
                    "Failed to parse config at {}: {}",
                    path_display(path),
                    source
                )
            }
            ConfigError::Write { path, source } => {
                write!(
                    f,
                    "Failed to write config at {}: {}",
                    path_display(path),
                    source
                )
            }
            ConfigError::MissingCredential { path } => {
                write!(
                    f,
                    "No API key configured. Edit [api_keys] openai in {} or set {}",
                    path_display(path),
                    API_KEY_ENV_VAR
                )
            }
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Write { source, .. } => Some(source.as_ref()),
            ConfigError::NoConfigDir | ConfigError::MissingCredential { .. } => None,
        }
    }
}

impl Config {
    /// Load the config at `config_path`, or defaults when the file is absent.
    pub fn load_from_path(config_path: &Path) -> Result<Config, ConfigError> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                path: config_path.to_path_buf(),
                source,
            })?;
            let config: Config =
                toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: config_path.to_path_buf(),
                    source,
                })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Load the config, first writing a placeholder file if none exists yet.
    pub fn load_or_create(config_path: &Path) -> Result<Config, ConfigError> {
        if !config_path.exists() {
            info!(path = %config_path.display(), "creating config with placeholder credential");
            Config::first_run().save_to_path(config_path)?;
        }
        Self::load_from_path(config_path)
    }

    pub fn save_to_path(&self, config_path: &Path) -> Result<(), ConfigError> {
        let write_err = |source: Box<dyn StdError + Send + Sync>| ConfigError::Write {
            path: config_path.to_path_buf(),
            source,
        };

        let parent = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir).map_err(|e| write_err(Box::new(e)))?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| write_err(Box::new(e)))?;
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new(),
        }
        .map_err(|e| write_err(Box::new(e)))?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| write_err(Box::new(e)))?;
        temp_file
            .as_file_mut()
            .sync_all()
            .map_err(|e| write_err(Box::new(e)))?;
        temp_file
            .persist(config_path)
            .map_err(|e| write_err(Box::new(e)))?;
        debug!(path = %config_path.display(), "config saved");
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let proj_dirs =
            ProjectDirs::from("org", "minichat", "minichat").ok_or(ConfigError::NoConfigDir)?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Resolve the credential, preferring a non-empty `OPENAI_API_KEY`.
    pub fn resolve_api_key(&self, config_path: &Path) -> Result<String, ConfigError> {
        self.resolve_api_key_with(std::env::var(API_KEY_ENV_VAR).ok(), config_path)
    }

    pub(crate) fn resolve_api_key_with(
        &self,
        env_key: Option<String>,
        config_path: &Path,
    ) -> Result<String, ConfigError> {
        if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
            debug!("using API key from {API_KEY_ENV_VAR}");
            return Ok(key.trim().to_string());
        }

        self.stored_api_key()
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingCredential {
                path: config_path.to_path_buf(),
            })
    }
}
