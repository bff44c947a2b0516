//! Configuration file handling.
//!
//! The configuration is a flat TOML file, by default `~/.config/vaultcli/vaultcli.toml`.
//! Options outside of the known set are kept, so `config set` works for arbitrary
//! `section.option` keys.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use vaultcli_crypto::WrapScheme;

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("Config directory not found (HOME environment variable not set)")]
    ConfigDirNotFound,

    #[error(
        "New config file created in '{0}'.\nPlease edit it and set your custom parameters."
    )]
    Created(PathBuf),

    #[error("vaultcli config file '{path}' is corrupted.\n{source}")]
    Corrupted {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Your config file '{0}' is invalid, please check it.")]
    Invalid(PathBuf),

    #[error("You can only specify an 'option' or 'section.option', got '{0}'")]
    InvalidOption(String),

    #[error("'{value}' is not a valid value for {option}, expected true or false")]
    InvalidValue { option: String, value: String },

    #[error("{0} is not defined in config")]
    NotDefined(String),

    #[error("vaultcli cannot write in config file.\n{0}")]
    Write(#[source] std::io::Error),

    #[error("vaultcli have a problem reading your keyfile '{path}'.\n{source}")]
    KeyFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings read by the commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) email: String,
    pub(crate) server: String,
    /// Private key file, or the passphrase file with the symmetric scheme
    pub(crate) key: PathBuf,
    pub(crate) public_key: Option<PathBuf>,
    /// Accept invalid TLS certificates. Only used when talking to `server`, the offline
    /// commands keep it as is.
    pub(crate) insecure: bool,
    pub(crate) wrap_scheme: WrapScheme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            email: "user@example.com".to_owned(),
            server: "https://example.com".to_owned(),
            key: PathBuf::from("vaultier.key"),
            public_key: None,
            insecure: false,
            wrap_scheme: WrapScheme::default(),
        }
    }
}

/// A configuration file on disk.
pub(crate) struct ConfigFile {
    path: PathBuf,
    table: toml::Table,
}

impl ConfigFile {
    /// Open the file at `path`, or at the default location.
    ///
    /// When the default file does not exist a new one is written and [ConfigError::Created] is
    /// returned so the user gets a chance to edit it first.
    pub(crate) fn open(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_config_path()?,
        };

        if !path.exists() {
            create_default(&path)?;
            return Err(ConfigError::Created(path));
        }

        let content = std::fs::read_to_string(&path)?;
        let table = content
            .parse::<toml::Table>()
            .map_err(|source| ConfigError::Corrupted {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "Loaded config file");

        Ok(Self { path, table })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// The typed settings, checking that the main values are present.
    pub(crate) fn config(&self) -> Result<Config, ConfigError> {
        let config = toml::Value::Table(self.table.clone())
            .try_into::<Config>()
            .map_err(|_| ConfigError::Invalid(self.path.clone()))?;

        if config.email.is_empty()
            || config.server.is_empty()
            || config.key.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid(self.path.clone()));
        }
        Ok(config)
    }

    /// Resolve a path from the configuration, relative ones start at the config directory.
    pub(crate) fn resolve(&self, path: &Path) -> PathBuf {
        match self.path.parent() {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Value of `option` or `section.option`.
    pub(crate) fn get(&self, option: &str) -> Result<String, ConfigError> {
        let (section, key) = split_option(option)?;
        let table = match section {
            Some(section) => self.table.get(section).and_then(toml::Value::as_table),
            None => Some(&self.table),
        };

        match table.and_then(|t| t.get(key)) {
            Some(toml::Value::String(s)) if !s.is_empty() => Ok(s.clone()),
            Some(toml::Value::String(_)) | None => Err(ConfigError::NotDefined(option.to_owned())),
            Some(value) => Ok(value.to_string()),
        }
    }

    /// Set `option` or `section.option` and write the file.
    pub(crate) fn set(&mut self, option: &str, value: &str) -> Result<(), ConfigError> {
        let (section, key) = split_option(option)?;
        let table = match section {
            Some(section) => self
                .table
                .entry(section)
                .or_insert(toml::Value::Table(toml::Table::new()))
                .as_table_mut()
                .ok_or_else(|| ConfigError::InvalidOption(option.to_owned()))?,
            None => &mut self.table,
        };
        table.insert(key.to_owned(), parse_value(section, key, value)?);

        let content = toml::to_string(&self.table)?;
        std::fs::write(&self.path, content).map_err(ConfigError::Write)?;
        info!(option, "Updated config file");
        Ok(())
    }
}

fn split_option(option: &str) -> Result<(Option<&str>, &str), ConfigError> {
    let parts: Vec<&str> = option.split('.').collect();
    match parts.as_slice() {
        [key] if !key.is_empty() => Ok((None, *key)),
        [section, key] if !section.is_empty() && !key.is_empty() => Ok((Some(*section), *key)),
        _ => Err(ConfigError::InvalidOption(option.to_owned())),
    }
}

/// Top level options stored as TOML booleans, everything else is kept as a string.
const BOOL_OPTIONS: &[&str] = &["insecure"];

fn parse_value(section: Option<&str>, key: &str, value: &str) -> Result<toml::Value, ConfigError> {
    if section.is_none() && BOOL_OPTIONS.contains(&key) {
        return value
            .parse::<bool>()
            .map(toml::Value::Boolean)
            .map_err(|_| ConfigError::InvalidValue {
                option: key.to_owned(),
                value: value.to_owned(),
            });
    }
    Ok(toml::Value::String(value.to_owned()))
}

fn create_default(path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let content = toml::to_string(&Config::default())?;
    std::fs::write(path, content).map_err(ConfigError::Write)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }

    Ok(())
}

/// Get the default config file location
fn default_config_path() -> Result<PathBuf, ConfigError> {
    #[cfg(target_os = "windows")]
    {
        let appdata = std::env::var("APPDATA").map_err(|_| ConfigError::ConfigDirNotFound)?;
        Ok(PathBuf::from(appdata).join("vaultcli").join("vaultcli.toml"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").map_err(|_| ConfigError::ConfigDirNotFound)?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("vaultcli")
            .join("vaultcli.toml"))
    }
}
