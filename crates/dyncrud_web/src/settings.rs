//! Layered runtime settings.
//!
//! Sources, later wins: built-in defaults, optional `dyncrud.toml` in the
//! working directory, then `DYNCRUD__<SECTION>__<KEY>` environment variables.

use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use config::builder::DefaultState;
use dyncrud_core::{default_log_level, LoggingConfig};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "dyncrud.toml";
const ENV_PREFIX: &str = "DYNCRUD";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Server {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    /// SQLite file; created and migrated on first start.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    pub level: String,
    /// Relative paths are resolved against the working directory.
    pub dir: PathBuf,
    pub stderr: bool,
}

impl Logging {
    pub fn resolve(&self, working_dir: &Path) -> LoggingConfig {
        let log_dir = if self.dir.is_absolute() {
            self.dir.clone()
        } else {
            working_dir.join(&self.dir)
        };
        LoggingConfig {
            level: self.level.clone(),
            log_dir,
            stderr: self.stderr,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub database: Database,
    pub logging: Logging,
}

impl Settings {
    /// Reads `dyncrud.toml` (if present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        defaults()?
            .add_source(
                File::with_name(SETTINGS_FILE)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(environment(None))
            .build()?
            .try_deserialize()
    }

    /// Builds settings from inline TOML plus an explicit variable map
    /// instead of the process environment.
    pub fn from_sources(toml: &str, env: HashMap<String, String>) -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .add_source(environment(Some(env)))
            .build()?
            .try_deserialize()
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("database.path", "dyncrud.sqlite3")?
        .set_default("logging.level", default_log_level())?
        .set_default("logging.dir", "logs")?
        .set_default("logging.stderr", true)
}

fn environment(source: Option<HashMap<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
        .source(source)
}
