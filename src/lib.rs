//! # http-exception
//!
//! Status-coded HTTP exceptions and content-negotiated error responses for
//! axum and tower services.
//!
//! Any fault raised while serving a request is classified into an
//! [`HttpException`], routed to the handler registered for its status code,
//! logged with a correlation identifier and rendered as JSON, XML, HTML or
//! plain text depending on the client's `Accept` header.
//!
//! ## Features
//!
//! - **Status routing**: register handlers per status code, with a default fallback
//! - **Content negotiation**: JSON, XML, HTML and plain text bodies
//! - **Correlation identifiers**: every response carries the id that was logged
//! - **Severity-aware logging**: runtime faults map onto log levels
//! - **Debug traces**: optional call traces with framework frames filtered out
//! - **Tower integration**: [`ExceptionLayer`](layer::ExceptionLayer) for axum routers
//!
//! ## Quick Start
//!
//! ```rust
//! use http_exception::prelude::*;
//! use axum::http::{Method, Uri};
//!
//! let mut manager = ExceptionManager::new(DefaultHandler::new());
//! manager
//!     .add_handler([StatusCode::NOT_FOUND], NotFoundHandler)
//!     .add_handler([StatusCode::METHOD_NOT_ALLOWED], MethodNotAllowedHandler)
//!     .set_logger(TracingLogger);
//!
//! let request = RequestContext::new(Method::GET, Uri::from_static("/users/7"))
//!     .with_accept(["application/json"]);
//!
//! let response = manager.dispatch(&request, HttpException::not_found());
//! assert_eq!(response.status, StatusCode::NOT_FOUND);
//! assert!(response.body.contains(r#""message":"Not found""#));
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod exception;
pub mod handler;
pub mod layer;
pub mod logger;
pub mod manager;
pub mod negotiation;
pub mod renderer;
pub mod severity;
pub mod trace;

// Re-export core types
pub use common::{ExceptionResponse, RequestContext};
pub use error::{ExceptionError, Result};
pub use exception::{BoxError, HttpException};
pub use manager::{ExceptionManager, ExceptionManagerBuilder};

pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use http_exception::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::{ExceptionResponse, RequestContext};
    pub use crate::config::{ConfigService, ExceptionConfig};
    pub use crate::error::{ExceptionError, Result};
    pub use crate::exception::{BoxError, HttpException};
    pub use crate::handler::{
        DefaultHandler, ExceptionHandler, MethodNotAllowedHandler, NotFoundHandler,
    };
    pub use crate::layer::ExceptionLayer;
    pub use crate::logger::{ExceptionLogger, LogContext, TracingLogger};
    pub use crate::manager::{ExceptionManager, ExceptionManagerBuilder};
    pub use crate::negotiation::Representation;
    pub use crate::renderer::{HtmlPage, RenderOptions};
    pub use crate::severity::{FaultSeverity, LogLevel, RuntimeFault, SeverityMap};
    pub use crate::trace::{Frame, FrameFilter, FrameMarker};
    pub use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
