use crate::config::schema::{InspectConfig, ValidationError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
    Validation {
        path: Option<PathBuf>,
        source: ValidationError,
    },
}

impl ConfigError {
    /// Attach the config file to parse and validation errors that lack one.
    fn with_path(mut self, file: &Path) -> Self {
        match &mut self {
            ConfigError::Toml { path, .. } | ConfigError::Validation { path, .. } => {
                path.get_or_insert_with(|| file.to_path_buf());
            }
            ConfigError::Io { .. } => {}
        }
        self
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config file {}: {}", path.display(), source)
            }
            ConfigError::Toml { path, source } => {
                match path {
                    Some(path) => write!(f, "config file {} is not valid TOML", path.display())?,
                    None => f.write_str("config is not valid TOML")?,
                }
                write!(f, ": {source}")
            }
            ConfigError::Validation { path, source } => {
                let count = source.issues.len();
                let noun = if count == 1 { "entry" } else { "entries" };
                match path {
                    Some(path) => write!(
                        f,
                        "config file {} has {count} invalid [kinds] {noun}",
                        path.display()
                    )?,
                    None => write!(f, "config has {count} invalid [kinds] {noun}")?,
                }
                write!(f, ":\n{source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
            ConfigError::Validation { source, .. } => Some(source),
        }
    }
}

pub fn load_from_str(input: &str) -> Result<InspectConfig, ConfigError> {
    let config: InspectConfig = toml_edit::de::from_str(input)
        .map_err(|source| ConfigError::Toml { path: None, source })?;
    config
        .validate()
        .map_err(|source| ConfigError::Validation { path: None, source })?;
    Ok(config)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<InspectConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents).map_err(|error| error.with_path(path))
}
