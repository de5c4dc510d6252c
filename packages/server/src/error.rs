use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

/// A single rule failure attributed to one match field. The form
/// layer uses `field` to highlight the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FieldError {
    /// Column-style field name, e.g. `score_a`.
    #[schema(example = "score_a")]
    pub field: &'static str,
    /// Human-readable description of the failure.
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`,
    /// `NOT_FOUND`, `CONFLICT`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    pub message: String,
    /// Field-attributed failures; populated when a write was rejected
    /// by the match rule checks, empty otherwise.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// A single request-shape problem (bad payload, bad query value).
    Validation(String),
    /// The match rule checks failed; all failures are reported
    /// together so the form can show every problem at once.
    Invalid(Vec<FieldError>),
    NotFound(String),
    Conflict(String),
    /// Uniqueness violation reported by the persistence layer,
    /// attributed to the field whose combination collided.
    UniqueViolation(FieldError),
    Internal(String),
}

impl AppError {
    /// Convenience for a single field-attributed failure.
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Invalid(vec![FieldError::new(field, message)])
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                    fields: Vec::new(),
                },
            ),
            AppError::Invalid(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: "One or more fields are invalid".into(),
                    fields,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                    fields: Vec::new(),
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                    fields: Vec::new(),
                },
            ),
            AppError::UniqueViolation(field) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: field.message.clone(),
                    fields: vec![field],
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                        fields: Vec::new(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_omits_empty_fields() {
        let body = ErrorBody {
            code: "NOT_FOUND",
            message: "Team not found".into(),
            fields: Vec::new(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("fields").is_none());
    }

    #[test]
    fn error_body_lists_field_errors() {
        let body = ErrorBody {
            code: "VALIDATION_ERROR",
            message: "One or more fields are invalid".into(),
            fields: vec![FieldError::new("score_a", "Both scores are required")],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["fields"][0]["field"], "score_a");
    }
}
