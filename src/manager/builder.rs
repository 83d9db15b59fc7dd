use super::ExceptionManager;
use crate::config::ExceptionConfig;
use crate::error::{ExceptionError, Result};
use crate::handler::ExceptionHandler;
use crate::logger::ExceptionLogger;
use crate::severity::SeverityMap;
use crate::trace::FrameFilter;
use axum::http::StatusCode;
use std::sync::Arc;

/// Builder for constructing an exception manager
///
/// Collects handlers and settings during configuration, then builds the
/// manager that is shared read-only across requests.
///
/// # Example
/// ```
/// use http_exception::prelude::*;
/// use axum::http::StatusCode;
///
/// let manager = ExceptionManager::builder()
///     .default_handler(DefaultHandler::new())
///     .handler([StatusCode::METHOD_NOT_ALLOWED], MethodNotAllowedHandler)
///     .logger(TracingLogger)
///     .build()
///     .unwrap();
/// ```
#[derive(Default)]
pub struct ExceptionManagerBuilder {
    default_handler: Option<Arc<dyn ExceptionHandler>>,
    handlers: Vec<(Vec<StatusCode>, Arc<dyn ExceptionHandler>)>,
    logger: Option<Arc<dyn ExceptionLogger>>,
    severity_map: Option<SeverityMap>,
    frame_filter: Option<FrameFilter>,
    config: ExceptionConfig,
}

impl ExceptionManagerBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the handler used when no status-specific handler matches
    pub fn default_handler<H: ExceptionHandler>(mut self, handler: H) -> Self {
        self.default_handler = Some(Arc::new(handler));
        self
    }

    /// Register a handler for the given statuses; later registrations win
    pub fn handler<I, H>(mut self, statuses: I, handler: H) -> Self
    where
        I: IntoIterator<Item = StatusCode>,
        H: ExceptionHandler,
    {
        self.handlers
            .push((statuses.into_iter().collect(), Arc::new(handler)));
        self
    }

    pub fn logger<L: ExceptionLogger>(mut self, logger: L) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    pub fn severity_map(mut self, severity_map: SeverityMap) -> Self {
        self.severity_map = Some(severity_map);
        self
    }

    pub fn frame_filter(mut self, frame_filter: FrameFilter) -> Self {
        self.frame_filter = Some(frame_filter);
        self
    }

    pub fn config(mut self, config: ExceptionConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the manager
    ///
    /// # Errors
    ///
    /// Returns [`ExceptionError::MissingDefaultHandler`] when no default
    /// handler was set.
    pub fn build(self) -> Result<ExceptionManager> {
        let default_handler = self
            .default_handler
            .ok_or(ExceptionError::MissingDefaultHandler)?;

        let mut manager = ExceptionManager {
            handlers: Default::default(),
            default_handler,
            logger: self.logger,
            severity_map: self.severity_map.unwrap_or_default(),
            frame_filter: self.frame_filter.unwrap_or_default(),
            config: self.config,
        };

        for (statuses, handler) in self.handlers {
            manager.add_shared_handler(statuses, handler);
        }

        Ok(manager)
    }
}
