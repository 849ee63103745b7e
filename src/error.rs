//! Application error type and its HTTP mapping.
//!
//! Services return `AppError`; handlers propagate it with `?` and axum renders it
//! through `IntoResponse` as `{"error": "..."}` with the matching status code.
//! Storage failures (including constraint breaches the services do not
//! translate) surface as 500 with a generic body and are logged server-side.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use time::{Date, Time};

#[derive(Debug, Serialize)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("reservation time {0} does not exist")]
    TimeNotFound(i64),

    #[error("theme {0} does not exist")]
    ThemeNotFound(i64),

    #[error("reservation {0} does not exist")]
    ReservationNotFound(i64),

    /// The requested slot is at or before the current moment.
    #[error("cannot reserve {date} {time}: the slot is already in the past")]
    PreviousTime { date: Date, time: Time },

    /// Another reservation already holds the same date, time and theme.
    #[error("a reservation for {date}, time {time_id}, theme {theme_id} already exists")]
    Duplicated {
        date: Date,
        time_id: i64,
        theme_id: i64,
    },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    Db(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::TimeNotFound(_) | Self::ThemeNotFound(_) | Self::ReservationNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::PreviousTime { .. } | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Duplicated { .. } | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Db(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
            self.to_string()
        };
        (status, Json(ErrorDto { error })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    #[test]
    fn maps_domain_errors_to_client_statuses() {
        assert_eq!(AppError::TimeNotFound(3).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::ThemeNotFound(3).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::PreviousTime {
                date: date!(2024 - 01 - 01),
                time: time!(10:00),
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Duplicated {
                date: date!(2024 - 01 - 01),
                time_id: 1,
                theme_id: 1,
            }
            .status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn storage_errors_are_server_errors() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
