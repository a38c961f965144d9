//! HTTP Error Handling

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;
use crate::domain::project::ProjectError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    /// 校验失败的字段，便于客户端定位输入
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            field: None,
            data: None,
        }
    }

    pub fn with_field(mut self, field: Option<&'static str>) -> Self {
        self.field = field;
        self
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const CONFLICT: i32 = 409;
    pub const INTERNAL_ERROR: i32 = 500;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest {
        field: Option<&'static str>,
        message: String,
    },
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            field: None,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // 业务错误一律 HTTP 200，通过 errno 区分
        let response = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(errno = errno::NOT_FOUND, error = %msg, "Resource not found");
                ErrorResponse::new(errno::NOT_FOUND, msg)
            }
            ApiError::BadRequest { field, message } => {
                tracing::warn!(
                    errno = errno::BAD_REQUEST,
                    field = field.unwrap_or_default(),
                    error = %message,
                    "Bad request"
                );
                ErrorResponse::new(errno::BAD_REQUEST, message).with_field(field)
            }
            ApiError::Conflict(msg) => {
                tracing::warn!(errno = errno::CONFLICT, error = %msg, "Write conflict");
                ErrorResponse::new(errno::CONFLICT, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = errno::INTERNAL_ERROR, error = %msg, "Internal server error");
                ErrorResponse::new(errno::INTERNAL_ERROR, msg)
            }
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { resource_type, id } => {
                ApiError::NotFound(format!("{} not found: {}", resource_type, id))
            }
            ApplicationError::ValidationError { field, message } => ApiError::BadRequest {
                field: Some(field),
                message,
            },
            ApplicationError::Conflict(msg) => ApiError::Conflict(msg),
            ApplicationError::RepositoryError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ProjectError> for ApiError {
    fn from(e: ProjectError) -> Self {
        ApiError::from(ApplicationError::from(e))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_validation_error_keeps_field() {
        let err = ApiError::from(ProjectError::InvalidChapterNumber(0));
        match err {
            ApiError::BadRequest { field, .. } => assert_eq!(field, Some("number")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_application_error_mapping() {
        let not_found = ApiError::from(ApplicationError::not_found("Project", Uuid::nil()));
        assert!(matches!(not_found, ApiError::NotFound(_)));

        let conflict = ApiError::from(ApplicationError::Conflict("stale".to_string()));
        assert!(matches!(conflict, ApiError::Conflict(_)));

        let internal = ApiError::from(ApplicationError::RepositoryError("disk".to_string()));
        assert!(matches!(internal, ApiError::Internal(_)));
    }

    #[test]
    fn test_errors_are_http_200() {
        let response = ApiError::Conflict("stale".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
