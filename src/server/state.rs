use axum::extract::FromRef;

use crate::logging::LoggerLevels;
use crate::service::CatalogService;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type RequestsCounter = Arc<AtomicU64>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog: CatalogService,
    pub logger_levels: LoggerLevels,
    pub requests_counter: RequestsCounter,
    pub hash: String,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        catalog: CatalogService,
        logger_levels: LoggerLevels,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            catalog,
            logger_levels,
            requests_counter: Arc::new(AtomicU64::new(0)),
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

impl FromRef<ServerState> for CatalogService {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog.clone()
    }
}

impl FromRef<ServerState> for LoggerLevels {
    fn from_ref(input: &ServerState) -> Self {
        input.logger_levels.clone()
    }
}
