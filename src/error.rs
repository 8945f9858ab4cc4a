use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("more than one record exists for day {0}")]
    DuplicateDay(String),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateDay(_) => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Store(e) => {
                error!(error = ?e, "record store request failed");
                json!({ "error": "record store request failed", "detail": format!("{e:#}") })
            }
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

/// Unwraps a required body field, failing validation when it is absent.
pub fn required<T>(field: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::validation(format!("{field} is required")))
}

/// A required quantity: present, finite and not negative.
pub fn required_amount(field: &str, value: Option<f64>) -> Result<f64, AppError> {
    let v = required(field, value)?;
    amount(field, v)
}

/// An optional quantity, 0 when absent.
pub fn optional_amount(field: &str, value: Option<f64>) -> Result<f64, AppError> {
    value.map_or(Ok(0.0), |v| amount(field, v))
}

pub fn required_positive(field: &str, value: Option<f64>) -> Result<f64, AppError> {
    let v = required_amount(field, value)?;
    if v == 0.0 {
        return Err(AppError::validation(format!("{field} must be greater than 0")));
    }
    Ok(v)
}

fn amount(field: &str, v: f64) -> Result<f64, AppError> {
    if !v.is_finite() || v < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(v)
}
