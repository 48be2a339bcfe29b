use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use dirs_next as dirs;
use globset::{Glob, GlobSet};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_RUNTIME: &str = "docker";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Container CLI used as the prefix of every listing command.
    #[serde(default = "default_runtime")]
    pub runtime: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Glob patterns matched against image names; matches are never reported.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_runtime() -> String {
    DEFAULT_RUNTIME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config { runtime: default_runtime(), timeout_secs: None, exclude: Vec::new() }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        let path = config_file_path()?;
        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            Self::from_toml(&contents)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, AppError> {
        let config: Config = toml::from_str(contents)?;
        if config.runtime.trim().is_empty() {
            return Err(AppError::config("'runtime' must not be empty"));
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<(), AppError> {
        let path = config_file_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut file = fs::File::create(path)?;
        let contents = toml::to_string_pretty(self)?;
        file.write_all(contents.as_bytes())?;
        Ok(())
    }

    pub fn append_exclude(&mut self, value: String) {
        if !self.exclude.iter().any(|existing| existing == &value) {
            self.exclude.push(value);
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }

    pub fn compile_excludes(&self) -> Result<Option<GlobSet>, AppError> {
        if self.exclude.is_empty() {
            return Ok(None);
        }

        let mut builder = globset::GlobSetBuilder::new();
        for pattern in &self.exclude {
            builder.add(Glob::new(pattern)?);
        }

        Ok(Some(builder.build()?))
    }
}

pub fn config_file_path() -> Result<PathBuf, AppError> {
    let config_root = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .ok_or_else(|| {
            AppError::config("Unable to determine configuration directory for this platform")
        })?;
    Ok(config_root.join("unused-images").join("config.toml"))
}

pub fn ensure_config_file() -> Result<PathBuf, AppError> {
    let path = config_file_path()?;
    if !path.exists() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let default = Config::default();
        let contents = toml::to_string_pretty(&default)?;
        fs::write(&path, contents)?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.runtime, "docker");
        assert!(config.timeout().is_none());
    }

    #[test]
    fn reads_all_keys() {
        let config = Config::from_toml(
            "runtime = \"podman\"\ntimeout_secs = 30\nexclude = [\"postgres*\"]\n",
        )
        .unwrap();
        assert_eq!(config.runtime, "podman");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        let set = config.compile_excludes().unwrap().unwrap();
        assert!(set.is_match("postgres:16"));
        assert!(!set.is_match("nginx"));
    }

    #[test]
    fn zero_timeout_means_unbounded() {
        let config = Config::from_toml("timeout_secs = 0").unwrap();
        assert!(config.timeout().is_none());
    }

    #[test]
    fn blank_runtime_is_rejected() {
        let err = Config::from_toml("runtime = \"  \"").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn invalid_glob_is_reported() {
        let config = Config { exclude: vec!["[".to_string()], ..Config::default() };
        assert!(matches!(config.compile_excludes(), Err(AppError::Glob(_))));
    }

    #[test]
    fn append_exclude_skips_duplicates() {
        let mut config = Config::default();
        config.append_exclude("redis*".to_string());
        config.append_exclude("redis*".to_string());
        assert_eq!(config.exclude, vec!["redis*".to_string()]);
    }
}
