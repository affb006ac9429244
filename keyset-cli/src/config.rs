//! Optional `keyset.toml` defaults.
//!
//! ```toml
//! [defaults]
//! limit = 25
//! order = "desc"
//! dialect = "sqlite"
//! ```

use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use keyset::{Dialect, MySql, Order, Postgres, Sqlite};
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "keyset.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub defaults: Defaults,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    pub limit: Option<i64>,
    pub order: Option<Order>,
    pub dialect: Option<DialectName>,
}

/// Placeholder style, selectable from the config file or `--dialect`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DialectName {
    /// `$1, $2, ...`
    #[default]
    Postgres,
    /// `?1, ?2, ...`
    Sqlite,
    /// Bare `?`
    Mysql,
    /// Bare `?`, for any driver using positional markers
    Question,
}

impl DialectName {
    pub fn dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Postgres => Box::new(Postgres),
            Self::Sqlite => Box::new(Sqlite),
            Self::Mysql | Self::Question => Box::new(MySql),
        }
    }
}

impl Config {
    /// Load `path`, or `keyset.toml` if present. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            },
        };
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&source)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn parse(source: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(source)?)
    }
}
