use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub logging_level: Option<String>,

    // Catalog settings
    pub genres: Option<Vec<String>>,
    pub year_range: Option<YearRangeConfig>,

    /// Initial level of each named logger, e.g. `books-logger = "DEBUG"`.
    pub loggers: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct YearRangeConfig {
    pub lower: i64,
    pub upper: i64,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
