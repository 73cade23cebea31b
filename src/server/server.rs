use anyhow::{Context, Result};
use std::time::Duration;

use tracing::{info, warn};

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

#[cfg(feature = "slowdown")]
use super::slowdown_request;
use super::{admin::make_admin_routes, log_requests, state::*, ServerConfig};
use crate::catalog_store::{CatalogError, NewBook};
use crate::logging::LoggerLevels;
use crate::service::{
    BookFilterParams, BookIdParams, CatalogService, PriceUpdateParams, ServiceResponse,
};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub books: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

fn invalid_input(what: &str, details: String) -> ServiceResponse {
    ServiceResponse::error(&CatalogError::InvalidInput(format!(
        "Error: invalid {}: {}",
        what, details
    )))
}

fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ServiceResponse> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| invalid_input("query parameters", rejection.body_text()))
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        books: state.catalog.total(),
    };
    Json(stats)
}

async fn health() -> &'static str {
    "OK"
}

async fn post_book(
    State(catalog): State<CatalogService>,
    body: Result<Json<NewBook>, JsonRejection>,
) -> ServiceResponse {
    match body {
        Ok(Json(new_book)) => catalog.add_book(new_book).into(),
        Err(rejection) => invalid_input("Book", rejection.body_text()),
    }
}

async fn get_books_total(
    State(catalog): State<CatalogService>,
    query: Result<Query<BookFilterParams>, QueryRejection>,
) -> ServiceResponse {
    match parse_query(query) {
        Ok(params) => catalog.count_books(&params).into(),
        Err(response) => response,
    }
}

async fn get_books(
    State(catalog): State<CatalogService>,
    query: Result<Query<BookFilterParams>, QueryRejection>,
) -> ServiceResponse {
    match parse_query(query) {
        Ok(params) => catalog.list_books(&params).into(),
        Err(response) => response,
    }
}

async fn get_book(
    State(catalog): State<CatalogService>,
    query: Result<Query<BookIdParams>, QueryRejection>,
) -> ServiceResponse {
    match parse_query(query) {
        Ok(params) => catalog.get_book(&params).into(),
        Err(response) => response,
    }
}

async fn put_book_price(
    State(catalog): State<CatalogService>,
    query: Result<Query<PriceUpdateParams>, QueryRejection>,
) -> ServiceResponse {
    match parse_query(query) {
        Ok(params) => catalog.update_price(&params).into(),
        Err(response) => response,
    }
}

async fn delete_book(
    State(catalog): State<CatalogService>,
    query: Result<Query<BookIdParams>, QueryRejection>,
) -> ServiceResponse {
    match parse_query(query) {
        Ok(params) => catalog.delete_book(&params).into(),
        Err(response) => response,
    }
}

pub fn make_app(
    config: ServerConfig,
    catalog: CatalogService,
    logger_levels: LoggerLevels,
) -> Router {
    let state = ServerState::new(config, catalog, logger_levels);

    let book_routes: Router = Router::new()
        .route(
            "/book",
            get(get_book)
                .post(post_book)
                .put(put_book_price)
                .delete(delete_book),
        )
        .route("/books", get(get_books))
        .route("/books/total", get(get_books_total))
        .route("/books/health", get(health))
        .with_state(state.clone());

    let mut app: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .merge(book_routes)
        .nest("/logs", make_admin_routes(state.clone()));

    #[cfg(feature = "slowdown")]
    {
        app = app.layer(middleware::from_fn(slowdown_request));
    }
    app = app.layer(middleware::from_fn_with_state(state, log_requests));

    app
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}

pub async fn run_server(
    config: ServerConfig,
    catalog: CatalogService,
    logger_levels: LoggerLevels,
) -> Result<()> {
    let address = format!("{}:{}", config.bind_address, config.port);
    let app = make_app(config, catalog, logger_levels);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Could not bind to {}", address))?;

    info!("Ready to serve at {}!", address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
