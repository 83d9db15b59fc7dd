//! Exception Manager
//!
//! Routes classified exceptions to status-specific handlers, logs them and
//! special-cases `OPTIONS` preflight requests on the not-found and
//! method-not-allowed paths.

use crate::common::{ExceptionResponse, RequestContext};
use crate::config::ExceptionConfig;
use crate::exception::{BoxError, HttpException};
use crate::handler::{DefaultHandler, ExceptionHandler, MethodNotAllowedHandler, NotFoundHandler};
use crate::logger::{self, ExceptionLogger, LogContext};
use crate::renderer::RenderOptions;
use crate::severity::{LogLevel, SeverityMap};
use crate::trace::{self, Frame, FrameFilter};
use axum::http::{HeaderValue, StatusCode, header};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

mod builder;

pub use builder::ExceptionManagerBuilder;

/// Dispatches faults to exception handlers
///
/// Configure it once at startup, then share it (usually behind an [`Arc`])
/// across requests. Dispatching only reads the manager, so no locking is
/// involved.
///
/// # Example
///
/// ```
/// use http_exception::prelude::*;
/// use axum::http::{Method, StatusCode, Uri};
///
/// let manager = ExceptionManager::builder()
///     .default_handler(DefaultHandler::new())
///     .handler([StatusCode::NOT_FOUND], NotFoundHandler)
///     .build()
///     .unwrap();
///
/// let request = RequestContext::new(Method::GET, Uri::from_static("/missing"))
///     .with_accept(["application/json"]);
/// let response = manager.not_found(&request);
///
/// assert_eq!(response.status, StatusCode::NOT_FOUND);
/// assert_eq!(response.content_type, "application/json; charset=utf-8");
/// ```
pub struct ExceptionManager {
    handlers: HashMap<StatusCode, Arc<dyn ExceptionHandler>>,
    default_handler: Arc<dyn ExceptionHandler>,
    logger: Option<Arc<dyn ExceptionLogger>>,
    severity_map: SeverityMap,
    frame_filter: FrameFilter,
    config: ExceptionConfig,
}

impl ExceptionManager {
    /// Create a manager with only a default handler
    pub fn new<H: ExceptionHandler>(default_handler: H) -> Self {
        Self {
            handlers: HashMap::new(),
            default_handler: Arc::new(default_handler),
            logger: None,
            severity_map: SeverityMap::default(),
            frame_filter: FrameFilter::default(),
            config: ExceptionConfig::default(),
        }
    }

    /// Create a manager with the stock default, not-found and
    /// method-not-allowed handlers
    pub fn with_stock_handlers() -> Self {
        let mut manager = Self::new(DefaultHandler::new());
        manager
            .add_handler([StatusCode::NOT_FOUND], NotFoundHandler)
            .add_handler([StatusCode::METHOD_NOT_ALLOWED], MethodNotAllowedHandler);
        manager
    }

    pub fn builder() -> ExceptionManagerBuilder {
        ExceptionManagerBuilder::new()
    }

    pub fn set_default_handler<H: ExceptionHandler>(&mut self, handler: H) -> &mut Self {
        self.default_handler = Arc::new(handler);
        self
    }

    /// Register `handler` for every status in `statuses`, replacing any
    /// previous registration
    pub fn add_handler<I, H>(&mut self, statuses: I, handler: H) -> &mut Self
    where
        I: IntoIterator<Item = StatusCode>,
        H: ExceptionHandler,
    {
        self.add_shared_handler(statuses, Arc::new(handler))
    }

    pub fn add_shared_handler<I>(
        &mut self,
        statuses: I,
        handler: Arc<dyn ExceptionHandler>,
    ) -> &mut Self
    where
        I: IntoIterator<Item = StatusCode>,
    {
        for status in statuses {
            tracing::debug!("Registering exception handler for {}", status.as_u16());
            self.handlers.insert(status, Arc::clone(&handler));
        }
        self
    }

    pub fn set_logger<L: ExceptionLogger>(&mut self, logger: L) -> &mut Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    pub fn set_severity_map(&mut self, severity_map: SeverityMap) -> &mut Self {
        self.severity_map = severity_map;
        self
    }

    pub fn set_frame_filter(&mut self, frame_filter: FrameFilter) -> &mut Self {
        self.frame_filter = frame_filter;
        self
    }

    pub fn set_config(&mut self, config: ExceptionConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ExceptionConfig {
        &self.config
    }

    /// The handler registered for `status`, or the default handler
    pub fn handler_for(&self, status: StatusCode) -> &dyn ExceptionHandler {
        self.handlers
            .get(&status)
            .unwrap_or(&self.default_handler)
            .as_ref()
    }

    pub fn log_level(&self, exception: &HttpException) -> LogLevel {
        self.severity_map.resolve(exception)
    }

    /// Turn any fault into a response.
    ///
    /// Faults that are not an [`HttpException`] are wrapped in an Internal
    /// Server Error that keeps the original as its cause.
    pub fn dispatch(
        &self,
        request: &RequestContext,
        fault: impl Into<BoxError>,
    ) -> ExceptionResponse {
        self.handle_exception(request, HttpException::classify(fault.into()))
    }

    /// Log `exception` and render it through its handler
    pub fn handle_exception(
        &self,
        request: &RequestContext,
        exception: HttpException,
    ) -> ExceptionResponse {
        self.respond(request, exception, self.config.debug)
    }

    /// Respond to a request that matched no route.
    ///
    /// `OPTIONS` requests get a `200` plain-text answer carrying only the
    /// message.
    pub fn not_found(&self, request: &RequestContext) -> ExceptionResponse {
        let exception = HttpException::not_found();

        if !request.is_options() {
            return self.handle_exception(request, exception);
        }

        let message = exception.message().to_string();
        self.preflight(request, preflight_exception(exception, message))
    }

    /// Respond to a request whose method the matched route does not accept.
    ///
    /// `OPTIONS` requests get a `200` plain-text `Allowed methods: ...` answer.
    pub fn not_allowed<S: AsRef<str>>(
        &self,
        request: &RequestContext,
        allowed_methods: &[S],
    ) -> ExceptionResponse {
        let methods = allowed_methods
            .iter()
            .map(|method| method.as_ref())
            .collect::<Vec<&str>>()
            .join(", ");

        let exception = HttpException::method_not_allowed().with_message(format!(
            "Method {} not allowed. Must be one of: {}",
            request.method(),
            methods
        ));

        let response = if request.is_options() {
            let message = format!("Allowed methods: {}", methods);
            self.preflight(request, preflight_exception(exception, message))
        } else {
            self.handle_exception(request, exception)
        };

        match HeaderValue::from_str(&methods) {
            Ok(allow) if !methods.is_empty() => response.with_header(header::ALLOW, allow),
            _ => response,
        }
    }

    /// Log and render; `details` attaches the debug trace and cause chain
    fn respond(
        &self,
        request: &RequestContext,
        exception: HttpException,
        details: bool,
    ) -> ExceptionResponse {
        tracing::debug!(
            "Dispatching exception {} ({})",
            exception.identifier(),
            exception.status().as_u16()
        );
        self.log(request, &exception);

        let request = if self.config.headless {
            Cow::Owned(request.clone().accept_text())
        } else {
            Cow::Borrowed(request)
        };

        let trace = details.then(|| self.debug_trace(&exception));
        let options = RenderOptions {
            escape: self.config.escape_output,
            trace: trace.as_deref(),
            causes: details,
        };

        self.handler_for(exception.status())
            .handle(&request, &exception, &options)
    }

    /// Plain-text `OPTIONS` answer whose body is exactly the message
    fn preflight(&self, request: &RequestContext, exception: HttpException) -> ExceptionResponse {
        let identifier = exception.identifier().to_string();
        self.respond(&request.clone().accept_text(), exception, false)
            .without_reference(&identifier)
    }

    fn log(&self, request: &RequestContext, exception: &HttpException) {
        let Some(logger) = &self.logger else {
            return;
        };

        let context = LogContext::from([
            (logger::IDENTIFIER.to_string(), exception.identifier().to_string()),
            (logger::HTTP_METHOD.to_string(), request.method().to_string()),
            (logger::REQUEST_URI.to_string(), request.uri().to_string()),
        ]);

        logger::log_best_effort(
            logger.as_ref(),
            self.log_level(exception),
            exception.message(),
            &context,
        );
    }

    fn debug_trace(&self, exception: &HttpException) -> Vec<Frame> {
        let frames = match exception.trace() {
            Some(frames) => frames.to_vec(),
            None => trace::capture(),
        };
        self.frame_filter.filter(frames)
    }
}

/// Re-issue `exception` as a `200` answer carrying `message`
fn preflight_exception(exception: HttpException, message: String) -> HttpException {
    HttpException::create(
        message,
        exception.description().map(str::to_string),
        exception.code(),
        StatusCode::OK,
    )
}
