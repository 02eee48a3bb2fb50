use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::models::meal::Category;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid category '{0}': expected breakfast, lunch or dinner")]
    InvalidCategory(String),

    #[error("Meal '{name}' not found in category {category}")]
    MealNotFound { name: String, category: Category },

    #[error("No meals available in category {0}")]
    NoMealsInCategory(Category),

    #[error("Meal '{name}' already exists in category {category}")]
    DuplicateMeal { name: String, category: Category },

    #[error("No menu found for date {0}")]
    MenuNotFound(String),

    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MenuNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Error half of every handler result: rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Failures of caller-supplied names or dates during resolution are the
    /// client's fault, whatever their usual status. Store errors stay 500.
    pub fn client(err: AppError) -> Self {
        if matches!(err, AppError::Store(_)) {
            return err.into();
        }
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let status = err.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("{err}");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Unreadable bodies (no JSON content type, malformed JSON, wrong field types)
/// are the caller's missing or invalid parameters.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid request body: {}", rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Treats an absent or empty string as missing.
pub fn require(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingParameter(field))
}
