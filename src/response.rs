use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub type ApiResult<T> = Result<JsonApiResponse<T>, AppError>;

/// Wire shape shared by the server and the client:
/// `{"status":"success", "message"?, "count"?, "data"}` or
/// `{"status":"error", "message", "error"?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        count: Option<usize>,
        data: T,
    },
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

#[derive(Debug)]
pub struct JsonApiResponse<T> {
    pub status: StatusCode,
    pub body: Envelope<T>,
}

impl<T: Serialize> JsonApiResponse<T> {
    pub fn with_status(status: StatusCode, message: impl Into<String>, data: T) -> ApiResult<T> {
        Ok(Self {
            status,
            body: Envelope::Success {
                message: Some(message.into()),
                count: None,
                data,
            },
        })
    }
}

impl<T: Serialize> JsonApiResponse<Vec<T>> {
    /// 200 with `count` set to the number of items.
    pub fn listed(items: Vec<T>) -> ApiResult<Vec<T>> {
        Ok(Self {
            status: StatusCode::OK,
            body: Envelope::Success {
                message: None,
                count: Some(items.len()),
                data: items,
            },
        })
    }
}

impl JsonApiResponse<()> {
    pub(crate) fn from_error(err: &AppError) -> Self {
        let error = if cfg!(debug_assertions) {
            err.detail().map(str::to_string)
        } else {
            None
        };
        Self {
            status: err.status(),
            body: Envelope::Error {
                message: err.message().to_string(),
                error,
            },
        }
    }
}

pub(crate) fn log_app_error(err: &AppError, status: StatusCode) {
    match err.detail() {
        Some(detail) => tracing::error!(
            status = %status,
            reason = err.message(),
            detail,
            "request failed"
        ),
        None => tracing::error!(status = %status, reason = err.message(), "request failed"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log_app_error(&self, status);
        }
        JsonApiResponse::from_error(&self).into_response()
    }
}

impl<T: Serialize> IntoResponse for JsonApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
