use anyhow::{Context, Result};
use bookstore_server::{
    config::{AppConfig, CliConfig, FileConfig, DEFAULT_BIND_ADDRESS, DEFAULT_PORT},
    logging::{base_directive_from_env, LoggerLevels},
    run_server, BookStore, CatalogService, RequestsLoggingLevel, ServerConfig,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = path_buf
        .canonicalize()
        .with_context(|| format!("Error resolving path: {}", s))?;
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The address to bind to.
    #[clap(long, default_value = DEFAULT_BIND_ADDRESS)]
    pub bind_address: String,

    /// The port to listen on.
    #[clap(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        bind_address: cli_args.bind_address,
        port: cli_args.port,
        logging_level: cli_args.logging_level,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    let logger_levels = LoggerLevels::new(base_directive_from_env(), &config.logger_levels)?;
    logger_levels.init_tracing()?;

    info!(
        "Creating catalog with genres {:?} and valid years {}",
        config.genres, config.year_range
    );
    let store = BookStore::new(config.genres.clone(), config.year_range)?;
    let catalog = CatalogService::new(store);

    info!("Starting server on {}", config.listen_address());

    run_server(ServerConfig::from(&config), catalog, logger_levels).await
}
