use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::patch::PatchError;

/// Body of a 400/422 answer, shaped like `application/problem+json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationProblem {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub status: u16,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationProblem {
    pub fn new(status: StatusCode) -> Self {
        let kind = match status {
            StatusCode::UNPROCESSABLE_ENTITY => {
                "https://tools.ietf.org/html/rfc9110#section-15.5.21"
            }
            _ => "https://tools.ietf.org/html/rfc9110#section-15.5.1",
        };
        Self {
            kind,
            title: "One or more validation errors occurred.",
            status: status.as_u16(),
            errors: BTreeMap::new(),
        }
    }

    pub fn with_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.entry(field.into()).or_default().push(message.into());
        self
    }

    fn from_validation(status: StatusCode, errors: &ValidationErrors) -> Self {
        let mut problem = Self::new(status);
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                let message = match &err.message {
                    Some(message) => message.to_string(),
                    None => err.code.to_string(),
                };
                problem = problem.with_error(field.to_string(), message);
            }
        }
        problem
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_REQUEST)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error("one or more validation errors occurred")]
    Validation(ValidationProblem),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Model validation failure on an incoming body.
    pub fn bad_request(errors: ValidationErrors) -> Self {
        Self::Validation(ValidationProblem::from_validation(StatusCode::BAD_REQUEST, &errors))
    }

    /// Model validation failure after a partial update was applied.
    pub fn unprocessable(errors: ValidationErrors) -> Self {
        Self::Validation(ValidationProblem::from_validation(
            StatusCode::UNPROCESSABLE_ENTITY,
            &errors,
        ))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(
            ValidationProblem::new(StatusCode::BAD_REQUEST).with_error("$", rejection.body_text()),
        )
    }
}

impl From<PatchError> for AppError {
    fn from(err: PatchError) -> Self {
        Self::Validation(
            ValidationProblem::new(StatusCode::UNPROCESSABLE_ENTITY)
                .with_error(err.field().name(), err.to_string()),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::Validation(problem) => (
                problem.status_code(),
                [(header::CONTENT_TYPE, "application/problem+json")],
                Json(problem),
            )
                .into_response(),
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                internal_error()
            }
            AppError::Other(err) => {
                tracing::error!(error = ?err, "unhandled error");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "internal server error" })),
    )
        .into_response()
}

pub type AppResult<T> = Result<T, AppError>;
