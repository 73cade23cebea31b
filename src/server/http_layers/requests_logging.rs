//! Request logging middleware

use super::super::state::ServerState;
use crate::logging::REQUEST_LOG_TARGET;
use axum::extract::State;
use axum::{
    body::Body,
    http::{header::HeaderMap, Request, Response},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::{debug, error, info};

#[derive(PartialEq, PartialOrd, Clone, Debug, clap::ValueEnum)]
pub enum RequestsLoggingLevel {
    None,
    Path,
    Headers,
    Body,
}

impl Default for RequestsLoggingLevel {
    fn default() -> Self {
        Self::Path
    }
}

impl std::fmt::Display for RequestsLoggingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

const MAX_LOGGABLE_BODY_LENGTH: usize = 1024;

enum ContentLengthParseResult {
    Ok(usize),
    No(&'static str),
}

fn parse_content_length(headers: &HeaderMap) -> ContentLengthParseResult {
    let value = match headers.get("content-length") {
        Some(x) => x,
        None => return ContentLengthParseResult::No("Content-length not set."),
    };

    let str_value = match value.to_str() {
        Ok(x) => x,
        Err(_) => {
            return ContentLengthParseResult::No("Could not get Content-length string value.")
        }
    };

    match str_value.parse::<usize>() {
        Ok(x) => ContentLengthParseResult::Ok(x),
        Err(_) => ContentLengthParseResult::No("Could not parse Content-length numeric value."),
    }
}

async fn buffer_for_logging(label: &str, body: Body, size: usize) -> Option<axum::body::Bytes> {
    match axum::body::to_bytes(body, size).await {
        Ok(bytes) => {
            info!(
                target: REQUEST_LOG_TARGET,
                "  {} Body:\n{}",
                label,
                String::from_utf8_lossy(&bytes)
            );
            Some(bytes)
        }
        Err(err) => {
            error!(target: REQUEST_LOG_TARGET, "Failed to read {} body: {:?}", label, err);
            None
        }
    }
}

fn internal_error() -> Response<Body> {
    let mut response = Response::new(Body::from("Internal Server Error"));
    *response.status_mut() = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
    response
}

pub async fn log_requests(
    State(state): State<ServerState>,
    mut request: Request<Body>,
    next: Next,
) -> impl IntoResponse {
    let level = state.config.requests_logging_level.clone();
    let request_number = state.requests_counter.fetch_add(1, Ordering::Relaxed) + 1;

    let start = Instant::now();

    if level > RequestsLoggingLevel::None {
        info!(
            target: REQUEST_LOG_TARGET,
            "Incoming request | #{} | resource: {} | HTTP Verb {}",
            request_number,
            request.uri(),
            request.method()
        );
    }

    if level >= RequestsLoggingLevel::Headers {
        info!(target: REQUEST_LOG_TARGET, "  Req Headers:");
        for header in request.headers().iter() {
            info!(target: REQUEST_LOG_TARGET, "    {:?}: {:?}", header.0, header.1);
        }
    }

    if level >= RequestsLoggingLevel::Body {
        match parse_content_length(request.headers()) {
            ContentLengthParseResult::No(reason) => {
                info!(target: REQUEST_LOG_TARGET, "  Req Body: {}", reason)
            }
            ContentLengthParseResult::Ok(size) => {
                if size < MAX_LOGGABLE_BODY_LENGTH {
                    let (parts, body) = request.into_parts();
                    let bytes = match buffer_for_logging("Req", body, size).await {
                        Some(bytes) => bytes,
                        None => return internal_error(),
                    };
                    request = Request::from_parts(parts, Body::from(bytes))
                } else {
                    info!(
                        target: REQUEST_LOG_TARGET,
                        "  Req Body: Too big to log ({:#})",
                        byte_unit::Byte::from(size)
                    );
                }
            }
        }
    }

    let mut response = next.run(request).await;

    if level >= RequestsLoggingLevel::Headers {
        info!(target: REQUEST_LOG_TARGET, "  Resp Headers:");
        for header in response.headers().iter() {
            info!(target: REQUEST_LOG_TARGET, "    {:?}: {:?}", header.0, header.1);
        }
    }

    if level >= RequestsLoggingLevel::Body {
        match parse_content_length(response.headers()) {
            ContentLengthParseResult::No(reason) => {
                info!(target: REQUEST_LOG_TARGET, "  Resp Body: {}", reason)
            }
            ContentLengthParseResult::Ok(size) => {
                if size < MAX_LOGGABLE_BODY_LENGTH {
                    let (parts, body) = response.into_parts();
                    let bytes = match buffer_for_logging("Resp", body, size).await {
                        Some(bytes) => bytes,
                        None => return internal_error(),
                    };
                    response = Response::from_parts(parts, Body::from(bytes))
                } else {
                    info!(
                        target: REQUEST_LOG_TARGET,
                        "  Resp Body: Too big to log ({:#})",
                        byte_unit::Byte::from(size)
                    );
                }
            }
        }
    }

    let duration = start.elapsed();

    if level > RequestsLoggingLevel::None {
        debug!(
            target: REQUEST_LOG_TARGET,
            "request #{} duration: {}ms | status {}",
            request_number,
            duration.as_millis(),
            response.status().as_u16()
        );
    }

    response
}
