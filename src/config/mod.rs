mod basic;
mod pool;
mod source;

pub use basic::BasicConfig;
pub use pool::{IdentityConfig, PoolConfig};
pub use source::PropertySource;

use crate::error::ConfigError;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration managed by Figment.
///
/// Backend declarations (`note.<i>.*`) live in the same figment but are not
/// part of this struct; they are scanned through [`PropertySource`] when the
/// registry is built.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Connection pool settings applied to every backend (see `pool` table).
    #[serde(default)]
    pub pool: PoolConfig,

    /// Trusted upstream identity settings (see `identity` table).
    #[serde(default)]
    pub identity: IdentityConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Backend declarations file inside a geOrchestra-style datadir.
const DATADIR_NOTES_FILE: &str = "mapfishapp/notes.toml";

impl Config {
    /// Builds a Figment that merges defaults and a config TOML file.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        }
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// Figment holding the backend declarations: `base` overlaid with the
    /// datadir notes file when `basic.datadir` is configured.
    pub fn backend_source(&self, base: Figment) -> Figment {
        match self.basic.datadir.as_deref() {
            Some(datadir) => base.merge(Toml::file(datadir_notes_file(datadir))),
            None => base,
        }
    }
}

fn datadir_notes_file(datadir: &Path) -> PathBuf {
    datadir.join(DATADIR_NOTES_FILE)
}
