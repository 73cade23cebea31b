mod file_config;

pub use file_config::{FileConfig, YearRangeConfig};

use crate::catalog_store::YearRange;
use crate::logging::{LogLevel, LOGGER_NAMES};
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::collections::BTreeMap;

pub const DEFAULT_PORT: u16 = 8574;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

pub const DEFAULT_GENRES: [&str; 6] = [
    "SCI_FI",
    "NOVEL",
    "HISTORY",
    "MANGA",
    "ROMANCE",
    "PROFESSIONAL",
];

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub bind_address: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            logging_level: RequestsLoggingLevel::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,

    // Catalog settings
    pub genres: Vec<String>,
    pub year_range: YearRange,

    pub logger_levels: BTreeMap<String, LogLevel>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let bind_address = file
            .bind_address
            .unwrap_or_else(|| cli.bind_address.clone());
        let port = file.port.unwrap_or(cli.port);

        let logging_level = match file.logging_level {
            Some(s) => match parse_logging_level(&s) {
                Some(level) => level,
                None => bail!("Invalid logging_level in config file: {}", s),
            },
            None => cli.logging_level.clone(),
        };

        let genres = match file.genres {
            Some(genres) => genres,
            None => DEFAULT_GENRES.iter().map(|g| g.to_string()).collect(),
        };
        if genres.is_empty() {
            bail!("genres must contain at least one genre");
        }
        if let Some(blank) = genres.iter().find(|g| g.trim().is_empty()) {
            bail!("genres must not contain blank values, got {:?}", blank);
        }

        let year_range = match file.year_range {
            Some(range) => match YearRange::new(range.lower, range.upper) {
                Ok(range) => range,
                Err(err) => bail!("Invalid year_range: {}", err),
            },
            None => YearRange::default(),
        };

        let mut logger_levels = BTreeMap::new();
        for (name, level) in file.loggers.unwrap_or_default() {
            if !LOGGER_NAMES.contains(&name.as_str()) {
                bail!("Unknown logger in config file: {}", name);
            }
            let level = match LogLevel::parse(&level) {
                Some(level) => level,
                None => bail!("Invalid level for logger {}: {}", name, level),
            };
            logger_levels.insert(name, level);
        }

        Ok(Self {
            bind_address,
            port,
            logging_level,
            genres,
            year_range,
            logger_levels,
        })
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
