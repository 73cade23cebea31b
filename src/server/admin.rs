//! Log level administration routes.
//!
//! These sit outside the catalog's `{result, errorMessage}` contract and
//! answer with plain text: the level on success, the error otherwise.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::info;

use super::state::ServerState;
use crate::logging::{LoggerLevels, REQUEST_LOG_TARGET};

#[derive(Deserialize, Debug)]
struct LoggerLevelQuery {
    #[serde(rename = "logger-name")]
    logger_name: Option<String>,
    #[serde(rename = "logger-level")]
    logger_level: Option<String>,
}

fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, message.into()).into_response()
}

async fn get_logger_level(
    State(levels): State<LoggerLevels>,
    Query(query): Query<LoggerLevelQuery>,
) -> Response {
    let Some(name) = query.logger_name else {
        return bad_request("Error: missing required parameter [logger-name]");
    };
    match levels.get(&name) {
        Ok(level) => level.to_string().into_response(),
        Err(err) => bad_request(err.to_string()),
    }
}

async fn put_logger_level(
    State(levels): State<LoggerLevels>,
    Query(query): Query<LoggerLevelQuery>,
) -> Response {
    let (Some(name), Some(level)) = (query.logger_name, query.logger_level) else {
        return bad_request("Error: both [logger-name] and [logger-level] are required");
    };
    match levels.set(&name, &level) {
        Ok(level) => {
            info!(
                target: REQUEST_LOG_TARGET,
                "Logger [{}] level set to {}", name, level
            );
            level.to_string().into_response()
        }
        Err(err) => bad_request(err.to_string()),
    }
}

pub fn make_admin_routes(state: ServerState) -> Router {
    Router::new()
        .route("/level", get(get_logger_level).put(put_logger_level))
        .with_state(state)
}
