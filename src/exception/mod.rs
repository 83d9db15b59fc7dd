//! Status-coded HTTP exceptions
//!
//! [`HttpException`] is the classified form of any fault raised while handling
//! a request. It carries the HTTP status the client will see, a correlation
//! identifier that is shown to the client and written to the log, and an
//! optional owned cause forming a finite chain back to the original fault.
//!
//! # Example
//!
//! ```
//! use http_exception::exception::HttpException;
//!
//! let io = std::io::Error::other("disk full");
//! let exception = HttpException::internal_server_error().with_cause(io);
//!
//! assert_eq!(exception.status().as_u16(), 500);
//! assert_eq!(exception.causes().count(), 1);
//! ```

use crate::trace::Frame;
use axum::http::StatusCode;
use std::error::Error;
use std::fmt;
use uuid::Uuid;

mod factory;

/// A type-erased fault entering the exception subsystem
pub type BoxError = Box<dyn Error + Send + Sync>;

/// A classified fault with a fixed status code and a unique identifier
#[derive(Debug)]
pub struct HttpException {
    status: StatusCode,
    identifier: String,
    message: String,
    description: Option<String>,
    code: Option<i64>,
    cause: Option<BoxError>,
    trace: Option<Vec<Frame>>,
}

impl HttpException {
    /// Create a new exception with a freshly generated identifier
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            identifier: generate_identifier(),
            message: message.into(),
            description: None,
            code: None,
            cause: None,
            trace: None,
        }
    }

    /// Classify an arbitrary fault.
    ///
    /// Faults that already are an `HttpException` pass through untouched,
    /// anything else becomes an Internal Server Error owning the original
    /// fault as its cause.
    pub fn classify(fault: BoxError) -> Self {
        match fault.downcast::<HttpException>() {
            Ok(exception) => *exception,
            Err(other) => Self::internal_server_error().with_boxed_cause(other),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an application-level error code
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    /// Take ownership of the fault that led to this one
    pub fn with_cause<E>(self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.with_boxed_cause(Box::new(cause))
    }

    pub fn with_boxed_cause(mut self, cause: BoxError) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Attach a captured call trace, most recent call first
    pub fn with_trace(mut self, frames: Vec<Frame>) -> Self {
        self.trace = Some(frames);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Opaque correlation token, unique per instance
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn code(&self) -> Option<i64> {
        self.code
    }

    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn trace(&self) -> Option<&[Frame]> {
        self.trace.as_deref()
    }

    pub fn is_internal_server_error(&self) -> bool {
        self.status == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Iterate the cause chain, oldest fault last.
    ///
    /// The chain is built from owned boxes so it is always finite.
    pub fn causes(&self) -> Causes<'_> {
        Causes {
            next: self.source(),
        }
    }
}

impl fmt::Display for HttpException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.status.as_u16())
    }
}

impl Error for HttpException {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

/// Iterator over the cause chain of an exception
pub struct Causes<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Iterator for Causes<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

fn generate_identifier() -> String {
    Uuid::new_v4().simple().to_string()
}
