//! `articlesd` configuration.
//!
//! Precedence, lowest first: built-in defaults, the TOML file named by
//! `--config`, then command-line flags (each of which may also come from its
//! environment variable).

use crate::error::{ServerError, ServerResult};
use articles_core::default_log_level;
use clap::{crate_version, value_parser, Arg, ArgMatches, Command};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";

/// Contents of the optional TOML configuration file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    /// Local address at which to listen; "address:port".
    pub address: Option<SocketAddr>,
    /// SQLite database file; absent means an in-memory database.
    pub database: Option<PathBuf>,
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files; absent means stderr.
    pub log_dir: Option<PathBuf>,
}

/// Values given on the command line or through the environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub address: Option<SocketAddr>,
    pub database: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl CliOverrides {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config: matches.get_one::<PathBuf>("config").cloned(),
            address: matches.get_one::<SocketAddr>("address").copied(),
            database: matches.get_one::<PathBuf>("database").cloned(),
            log_level: matches.get_one::<String>("log-level").cloned(),
            log_dir: matches.get_one::<PathBuf>("log-dir").cloned(),
        }
    }
}

/// Fully resolved server configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub address: SocketAddr,
    pub database: Option<PathBuf>,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Reads the config file named in `overrides`, if any, and layers the
    /// overrides on top of it.
    pub fn resolve(overrides: CliOverrides) -> ServerResult<Self> {
        let file = match &overrides.config {
            Some(path) => parse_config_file(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::from_parts(file, overrides))
    }

    pub fn from_parts(file: FileConfig, overrides: CliOverrides) -> Self {
        Self {
            address: overrides
                .address
                .or(file.address)
                .unwrap_or_else(default_address),
            database: overrides.database.or(file.database),
            log_level: overrides
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: overrides.log_dir.or(file.log_dir),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_parts(FileConfig::default(), CliOverrides::default())
    }
}

fn default_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

/// Parses one TOML configuration file.
pub fn parse_config_file(path: &Path) -> ServerResult<FileConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| ServerError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<FileConfig>(&text).map_err(|source| ServerError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Command-line definition for `articlesd`.
pub fn command() -> Command {
    Command::new("articlesd")
        .version(crate_version!())
        .about("REST service for articles backed by SQLite")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .num_args(1)
                .value_parser(value_parser!(PathBuf))
                .env("ARTICLES_CONFIG")
                .help("path to a TOML configuration file"),
        )
        .arg(
            Arg::new("address")
                .short('a')
                .long("address")
                .num_args(1)
                .value_parser(value_parser!(SocketAddr))
                .env("ARTICLES_ADDRESS")
                .help(format!("address:port to listen on [default: {DEFAULT_ADDRESS}]")),
        )
        .arg(
            Arg::new("database")
                .short('d')
                .long("database")
                .num_args(1)
                .value_parser(value_parser!(PathBuf))
                .env("ARTICLES_DATABASE")
                .help("SQLite database file; an in-memory database is used when omitted"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .num_args(1)
                .env("ARTICLES_LOG_LEVEL")
                .help("trace|debug|info|warn|error"),
        )
        .arg(
            Arg::new("log-dir")
                .short('L')
                .long("log-dir")
                .num_args(1)
                .value_parser(value_parser!(PathBuf))
                .env("ARTICLES_LOG_DIR")
                .help("absolute directory for rolling log files; logs go to stderr when omitted"),
        )
}
