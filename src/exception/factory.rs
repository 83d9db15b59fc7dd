use super::HttpException;
use crate::error::{ExceptionError, Result};
use axum::http::StatusCode;

impl HttpException {
    /// Create an exception for `status` with every optional field set at once
    pub fn create(
        message: impl Into<String>,
        description: Option<String>,
        code: Option<i64>,
        status: StatusCode,
    ) -> Self {
        let mut exception = Self::new(status, message);
        exception.description = description;
        exception.code = code;
        exception
    }

    /// Create an exception using the canonical reason phrase as message
    pub fn from_status(status: StatusCode) -> Self {
        Self::new(status, status.canonical_reason().unwrap_or("Unknown error"))
    }

    /// Create an exception from a raw numeric status code
    pub fn from_code(code: u16) -> Result<Self> {
        StatusCode::from_u16(code)
            .map(Self::from_status)
            .map_err(|_| ExceptionError::InvalidStatusCode(code))
    }

    pub fn bad_request() -> Self {
        Self::from_status(StatusCode::BAD_REQUEST)
    }

    pub fn unauthorized() -> Self {
        Self::from_status(StatusCode::UNAUTHORIZED)
    }

    pub fn forbidden() -> Self {
        Self::from_status(StatusCode::FORBIDDEN)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found")
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    }

    pub fn not_acceptable() -> Self {
        Self::from_status(StatusCode::NOT_ACCEPTABLE)
    }

    pub fn conflict() -> Self {
        Self::from_status(StatusCode::CONFLICT)
    }

    pub fn gone() -> Self {
        Self::from_status(StatusCode::GONE)
    }

    pub fn unsupported_media_type() -> Self {
        Self::from_status(StatusCode::UNSUPPORTED_MEDIA_TYPE)
    }

    pub fn unprocessable_entity() -> Self {
        Self::from_status(StatusCode::UNPROCESSABLE_ENTITY)
    }

    pub fn too_many_requests() -> Self {
        Self::from_status(StatusCode::TOO_MANY_REQUESTS)
    }

    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Application error")
    }

    pub fn not_implemented() -> Self {
        Self::from_status(StatusCode::NOT_IMPLEMENTED)
    }

    pub fn service_unavailable() -> Self {
        Self::from_status(StatusCode::SERVICE_UNAVAILABLE)
    }
}
