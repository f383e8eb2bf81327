use axum::http::StatusCode;

use crate::db::dao::DaoLayerError;

pub const TODO_NOT_FOUND: &str = "Todo not found";

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    /// `detail` is the underlying cause. It is always logged and only echoed to
    /// callers in debug builds.
    Internal {
        message: String,
        detail: Option<String>,
    },
    /// Statuses produced outside the handlers (unknown route, wrong method).
    Status {
        status: StatusCode,
        message: String,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            detail: None,
        }
    }

    pub fn internal_with_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            detail: Some(detail.into()),
        }
    }

    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::BadRequest(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::INTERNAL_SERVER_ERROR => Self::internal(message),
            _ => Self::Status { status, message },
        }
    }

    /// Maps a DAO failure for one operation. `failure` is the message callers
    /// see when the store itself is at fault.
    pub fn from_dao(err: DaoLayerError, failure: &str) -> Self {
        match err {
            DaoLayerError::NotFound { .. } => Self::not_found(TODO_NOT_FOUND),
            DaoLayerError::Db(db_err) => Self::internal_with_detail(failure, db_err.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Status { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(message)
            | Self::NotFound(message)
            | Self::Internal { message, .. }
            | Self::Status { message, .. } => message.as_str(),
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Internal { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{}: {}", self.message(), detail),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use sea_orm::DbErr;

    use super::{AppError, TODO_NOT_FOUND};
    use crate::db::dao::DaoLayerError;

    #[test]
    fn dao_not_found_becomes_404_with_fixed_message() {
        let err = AppError::from_dao(
            DaoLayerError::NotFound {
                entity: "Todo",
                id: 3,
            },
            "Failed to update todo",
        );

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), TODO_NOT_FOUND);
    }

    #[test]
    fn dao_store_failure_keeps_generic_message_and_detail() {
        let err = AppError::from_dao(
            DaoLayerError::Db(DbErr::Custom("pool timed out".to_string())),
            "Failed to fetch todos",
        );

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Failed to fetch todos");
        assert!(err.detail().unwrap_or_default().contains("pool timed out"));
    }

    #[test]
    fn from_status_keeps_unmapped_statuses() {
        let err = AppError::from_status(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");

        assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(err.to_string(), "Method Not Allowed");
    }
}
