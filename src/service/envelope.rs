//! Uniform `{result, errorMessage}` response body and the mapping from
//! catalog outcomes to status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::catalog_store::{CatalogError, CatalogResult, BOOKS_LOG_TARGET};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub result: Value,
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

impl Envelope {
    pub fn success(result: Value) -> Envelope {
        Envelope {
            result,
            error_message: String::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Envelope {
        Envelope {
            result: Value::String(String::new()),
            error_message: message.into(),
        }
    }
}

pub fn status_for(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::DuplicateTitle { .. }
        | CatalogError::YearOutOfRange { .. }
        | CatalogError::InvalidPrice { .. } => StatusCode::CONFLICT,
        CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
        CatalogError::InvalidGenreFilter { .. } | CatalogError::InvalidInput(_) => {
            StatusCode::BAD_REQUEST
        }
    }
}

/// An envelope together with the status it is sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    pub status: StatusCode,
    pub envelope: Envelope,
}

impl ServiceResponse {
    pub fn ok<T: Serialize>(result: &T) -> ServiceResponse {
        match serde_json::to_value(result) {
            Ok(value) => ServiceResponse {
                status: StatusCode::OK,
                envelope: Envelope::success(value),
            },
            Err(err) => {
                error!(target: BOOKS_LOG_TARGET, "Could not serialize result: {}", err);
                ServiceResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    envelope: Envelope::failure(format!("Error: {}", err)),
                }
            }
        }
    }

    pub fn error(err: &CatalogError) -> ServiceResponse {
        ServiceResponse {
            status: status_for(err),
            envelope: Envelope::failure(err.to_string()),
        }
    }
}

impl<T: Serialize> From<CatalogResult<T>> for ServiceResponse {
    fn from(result: CatalogResult<T>) -> Self {
        match result {
            Ok(value) => ServiceResponse::ok(&value),
            Err(err) => ServiceResponse::error(&err),
        }
    }
}

impl IntoResponse for ServiceResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}
