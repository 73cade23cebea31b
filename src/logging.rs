//! Process logging setup and the named loggers whose levels can be changed
//! while the server is running.
//!
//! Each named logger is a `tracing` target. Levels are applied by rebuilding
//! the `EnvFilter` behind a reload layer, so a change takes effect for every
//! event emitted after it.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

use crate::catalog_store::BOOKS_LOG_TARGET;

pub const REQUEST_LOG_TARGET: &str = "request-logger";

/// Names of the loggers exposed through the admin routes.
pub const LOGGER_NAMES: [&str; 2] = [REQUEST_LOG_TARGET, BOOKS_LOG_TARGET];

/// Directive used for everything that isn't a named logger, unless
/// overridden by the `LOG_LEVEL` environment variable.
pub const DEFAULT_BASE_DIRECTIVE: &str = "info";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn parse(s: &str) -> Option<LogLevel> {
        LogLevel::from_str(s.trim(), true).ok()
    }

    fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_directive().to_uppercase())
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Error: no such logger [{0}]")]
    UnknownLogger(String),

    #[error("Error: [{0}] is not a valid log level, expected one of ERROR, WARN, INFO, DEBUG, TRACE")]
    InvalidLevel(String),

    #[error("Error: could not build log filter: {0}")]
    Filter(String),

    #[error("Error: could not apply log levels: {0}")]
    Reload(String),
}

pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

struct LoggerLevelsInner {
    base_directive: String,
    levels: BTreeMap<&'static str, LogLevel>,
    handle: Option<FilterHandle>,
}

/// Current level of each named logger.
///
/// Without a reload handle (tests, embedding) levels are only tracked, not
/// applied to any subscriber.
#[derive(Clone)]
pub struct LoggerLevels {
    inner: Arc<Mutex<LoggerLevelsInner>>,
}

fn known_logger(name: &str) -> Option<&'static str> {
    LOGGER_NAMES.iter().copied().find(|n| *n == name)
}

impl LoggerLevels {
    pub fn new(
        base_directive: impl Into<String>,
        initial: &BTreeMap<String, LogLevel>,
    ) -> Result<LoggerLevels, LoggingError> {
        let mut levels: BTreeMap<&'static str, LogLevel> = LOGGER_NAMES
            .iter()
            .map(|name| (*name, LogLevel::default()))
            .collect();
        for (name, level) in initial.iter() {
            let name = known_logger(name).ok_or_else(|| LoggingError::UnknownLogger(name.clone()))?;
            levels.insert(name, *level);
        }

        Ok(LoggerLevels {
            inner: Arc::new(Mutex::new(LoggerLevelsInner {
                base_directive: base_directive.into(),
                levels,
                handle: None,
            })),
        })
    }

    /// Installs the global subscriber with a reloadable filter built from the
    /// current levels.
    pub fn init_tracing(&self) -> Result<(), LoggingError> {
        let filter = self.build_filter()?;
        let (filter_layer, handle) = reload::Layer::new(filter);

        tracing_subscriber::registry()
            .with(filter_layer)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .map_err(|e| LoggingError::Reload(e.to_string()))?;

        self.lock().handle = Some(handle);
        Ok(())
    }

    pub fn get(&self, logger_name: &str) -> Result<LogLevel, LoggingError> {
        let name = known_logger(logger_name)
            .ok_or_else(|| LoggingError::UnknownLogger(logger_name.to_string()))?;
        Ok(self.lock().levels[name])
    }

    pub fn set(&self, logger_name: &str, level: &str) -> Result<LogLevel, LoggingError> {
        let name = known_logger(logger_name)
            .ok_or_else(|| LoggingError::UnknownLogger(logger_name.to_string()))?;
        let level = LogLevel::parse(level).ok_or_else(|| LoggingError::InvalidLevel(level.to_string()))?;

        let mut inner = self.lock();
        let previous = inner.levels.insert(name, level);
        if let Err(err) = Self::apply(&inner) {
            if let Some(previous) = previous {
                inner.levels.insert(name, previous);
            }
            return Err(err);
        }
        Ok(level)
    }

    pub fn directives(&self) -> String {
        Self::directives_of(&self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LoggerLevelsInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn directives_of(inner: &LoggerLevelsInner) -> String {
        let mut directives = vec![inner.base_directive.clone()];
        for (name, level) in inner.levels.iter() {
            directives.push(format!("{}={}", name, level.as_directive()));
        }
        directives.join(",")
    }

    fn build_filter(&self) -> Result<EnvFilter, LoggingError> {
        EnvFilter::try_new(self.directives()).map_err(|e| LoggingError::Filter(e.to_string()))
    }

    fn apply(inner: &LoggerLevelsInner) -> Result<(), LoggingError> {
        let filter = EnvFilter::try_new(Self::directives_of(inner))
            .map_err(|e| LoggingError::Filter(e.to_string()))?;
        match &inner.handle {
            Some(handle) => handle
                .reload(filter)
                .map_err(|e| LoggingError::Reload(e.to_string())),
            None => Ok(()),
        }
    }
}

/// Reads the base directive from `LOG_LEVEL`, falling back to
/// [`DEFAULT_BASE_DIRECTIVE`].
pub fn base_directive_from_env() -> String {
    std::env::var("LOG_LEVEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_DIRECTIVE.to_string())
}
