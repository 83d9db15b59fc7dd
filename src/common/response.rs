use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

/// A rendered exception response
///
/// Kept as plain data so handlers and the manager can post-process it before
/// it is turned into an axum [`Response`].
///
/// # Example
/// ```
/// use http_exception::common::ExceptionResponse;
/// use axum::http::StatusCode;
///
/// let response = ExceptionResponse::new(StatusCode::OK, "text/plain; charset=utf-8", "ok");
/// assert_eq!(response.body, "ok");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl ExceptionResponse {
    pub fn new(
        status: StatusCode,
        content_type: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Strip a leading `(<identifier>) ` correlation prefix from the body
    pub fn without_reference(mut self, identifier: &str) -> Self {
        let prefix = format!("({}) ", identifier);
        if let Some(stripped) = self.body.strip_prefix(&prefix) {
            self.body = stripped.to_string();
        }
        self
    }
}

impl IntoResponse for ExceptionResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            self.headers,
            [(header::CONTENT_TYPE, self.content_type)],
            self.body,
        )
            .into_response()
    }
}
