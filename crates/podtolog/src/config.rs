//! Static shard host configuration.
//!
//! Sources, highest priority first:
//! - The `PODTOLOG_HOST` environment variable
//! - `podtolog.yaml` in the current directory
//! - `podtolog.yaml` in the user config directory (e.g. `~/.config/podtolog/`)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::PodLogError;

/// Environment variable holding the shard host.
pub const HOST_ENV_VAR: &str = "PODTOLOG_HOST";

/// Config file key holding the shard host.
pub const HOST_CONFIG_KEY: &str = "host";

/// Name of the config file looked up in each search directory.
pub const CONFIG_FILE_NAME: &str = "podtolog.yaml";

/// Contents of `podtolog.yaml`.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    /// Shard hostname.
    #[serde(default)]
    pub host: Option<String>,
}

/// Layered configuration sources for the shard host.
#[derive(Debug, Clone, Default)]
pub struct HostSources {
    /// Value of the environment variable, if set.
    pub env_host: Option<String>,
    /// Directories searched for [`CONFIG_FILE_NAME`], in order.
    pub search_dirs: Vec<PathBuf>,
}

impl HostSources {
    /// Sources from the process environment and the standard search path.
    #[must_use]
    pub fn from_env() -> Self {
        let env_host = std::env::var(HOST_ENV_VAR).ok().filter(|v| !is_blank(v));

        let mut search_dirs = vec![PathBuf::from(".")];
        if let Some(dir) = dirs::config_dir() {
            search_dirs.push(dir.join("podtolog"));
        }

        Self {
            env_host,
            search_dirs,
        }
    }

    /// Find the first config file present in the search path.
    #[must_use]
    pub fn config_file(&self) -> Option<PathBuf> {
        self.search_dirs
            .iter()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|path| path.is_file())
    }

    /// Resolve the shard host.
    ///
    /// The environment wins over the config file. Blank values count as
    /// unset. A missing config file is skipped; an unreadable or malformed
    /// one fails immediately.
    ///
    /// # Errors
    ///
    /// Returns [`PodLogError::InvalidConfigFile`] for a bad config file and
    /// [`PodLogError::MissingConfig`] if no source provides a host.
    pub fn host(&self) -> Result<String, PodLogError> {
        if let Some(host) = self.env_host.as_deref().filter(|h| !is_blank(h)) {
            debug!(source = HOST_ENV_VAR, "Using shard host from environment");
            return Ok(host.to_string());
        }

        if let Some(path) = self.config_file() {
            let config = read_config_file(&path)?;
            if let Some(host) = config.host.filter(|h| !is_blank(h)) {
                debug!(path = %path.display(), "Using shard host from config file");
                return Ok(host);
            }
        }

        Err(PodLogError::MissingConfig {
            env_var: HOST_ENV_VAR,
            config_key: HOST_CONFIG_KEY,
        })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Read and parse a config file.
///
/// An empty file parses as an empty config.
///
/// # Errors
///
/// Returns [`PodLogError::InvalidConfigFile`] if the file cannot be read or parsed.
pub fn read_config_file(path: &Path) -> Result<FileConfig, PodLogError> {
    let invalid = |message: String| PodLogError::InvalidConfigFile {
        path: path.to_path_buf(),
        message,
    };

    let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    if content.trim().is_empty() {
        return Ok(FileConfig::default());
    }

    serde_yaml::from_str(&content).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(env_host: Option<&str>, search: &[&Path]) -> HostSources {
        HostSources {
            env_host: env_host.map(ToString::to_string),
            search_dirs: search.iter().map(|d| d.to_path_buf()).collect(),
        }
    }

    #[test]
    fn test_env_takes_priority_over_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "host: file.example.com\n",
        )
        .unwrap();

        let host = sources(Some("env.example.com"), &[dir.path()]).host().unwrap();
        assert_eq!(host, "env.example.com");
    }

    #[test]
    fn test_first_directory_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(
            first.path().join(CONFIG_FILE_NAME),
            "host: first.example.com\n",
        )
        .unwrap();
        std::fs::write(
            second.path().join(CONFIG_FILE_NAME),
            "host: second.example.com\n",
        )
        .unwrap();

        let host = sources(None, &[first.path(), second.path()]).host().unwrap();
        assert_eq!(host, "first.example.com");
    }

    #[test]
    fn test_absent_file_falls_through_to_next_directory() {
        let empty = tempfile::tempdir().unwrap();
        let user = tempfile::tempdir().unwrap();
        std::fs::write(
            user.path().join(CONFIG_FILE_NAME),
            "host: user.example.com\n",
        )
        .unwrap();

        let host = sources(None, &[empty.path(), user.path()]).host().unwrap();
        assert_eq!(host, "user.example.com");
    }

    #[test]
    fn test_blank_env_falls_through_to_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "host: file.example.com\n",
        )
        .unwrap();

        let host = sources(Some("   "), &[dir.path()]).host().unwrap();
        assert_eq!(host, "file.example.com");
    }

    #[test]
    fn test_blank_values_are_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "host: \"  \"\n").unwrap();

        let err = sources(Some(" \t"), &[dir.path()]).host().unwrap_err();
        assert!(matches!(err, PodLogError::MissingConfig { .. }));
    }

    #[test]
    fn test_nothing_configured_names_both_sources() {
        let empty = tempfile::tempdir().unwrap();
        let err = sources(None, &[empty.path()]).host().unwrap_err();

        assert!(matches!(err, PodLogError::MissingConfig { .. }));
        let message = err.to_string();
        assert!(message.contains(HOST_ENV_VAR));
        assert!(message.contains(HOST_CONFIG_KEY));
    }

    #[test]
    fn test_file_without_host_is_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "other: value\n").unwrap();

        let err = sources(None, &[dir.path()]).host().unwrap_err();
        assert!(matches!(err, PodLogError::MissingConfig { .. }));
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "host: [unclosed\n").unwrap();

        let err = sources(None, &[dir.path()]).host().unwrap_err();
        assert!(matches!(err, PodLogError::InvalidConfigFile { .. }));
    }

    #[test]
    fn test_empty_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "").unwrap();

        assert!(read_config_file(&path).unwrap().host.is_none());
    }
}
