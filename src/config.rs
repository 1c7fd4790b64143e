use crate::model::Target;
use bytes::Bytes;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the file read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("error reading config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("error parsing duration {value:?}: {source}")]
    Duration {
        value: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
}

/// The document as it is written on disk.
#[derive(Debug, Deserialize)]
struct FileConfig {
    url: String,
    concurrency: usize,
    duration: String,
    #[serde(default)]
    data: String,
    #[serde(default)]
    cookie: String,
}

/// Resolved run configuration. Never mutated once loaded.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub concurrency: usize,
    pub duration: Duration,
    pub data: Bytes,
    pub cookie: String,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = serde_yaml::from_str(text)?;

        let duration = parse_duration(&file.duration)?;
        if file.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        Ok(Self {
            url: file.url,
            concurrency: file.concurrency,
            duration,
            data: Bytes::from(file.data),
            cookie: file.cookie,
        })
    }

    /// What every worker sends on each iteration.
    pub fn target(&self) -> Target {
        Target {
            url: self.url.clone(),
            body: self.data.clone(),
            cookie: self.cookie.clone(),
        }
    }
}

fn parse_duration(value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|source| ConfigError::Duration {
        value: value.to_string(),
        source,
    })
}
