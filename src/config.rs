use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::search;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    pub limit: Option<usize>,
    pub suggest_limit: Option<usize>,
    pub recent_limit: Option<usize>,
}

pub const DEFAULT_RECENT_LIMIT: usize = 10;

impl SearchConfig {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(search::DEFAULT_LIMIT)
    }

    pub fn suggest_limit(&self) -> usize {
        self.suggest_limit
            .unwrap_or(search::autocomplete::DEFAULT_LIMIT)
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit.unwrap_or(DEFAULT_RECENT_LIMIT)
    }
}

fn home() -> String {
    std::env::var("HOME").unwrap_or_else(|_| ".".into())
}

impl Config {
    /// Load config from `$TASKSCOPE_CONFIG`, or `~/.taskscope/config.toml`.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = match std::env::var("TASKSCOPE_CONFIG") {
            Ok(p) => PathBuf::from(p),
            Err(_) => PathBuf::from(format!("{}/.taskscope/config.toml", home())),
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Config = match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("failed to parse {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
        };
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let limits = [
            ("limit", self.search.limit),
            ("suggest_limit", self.search.suggest_limit),
            ("recent_limit", self.search.recent_limit),
        ];
        for (name, value) in limits {
            if value == Some(0) {
                bail!(
                    "failed to parse {}: search.{name} must be greater than zero",
                    path.display()
                );
            }
        }
        Ok(())
    }

    /// Database location: an explicit path wins, then the config file, then
    /// `~/.taskscope/taskscope.db`.
    pub fn db_path(&self, explicit: Option<&str>) -> String {
        if let Some(p) = explicit {
            return p.to_string();
        }
        match &self.database.path {
            Some(p) => p.display().to_string(),
            None => format!("{}/.taskscope/taskscope.db", home()),
        }
    }
}
