//! Exception logging
//!
//! The manager forwards one record per dispatched exception to an
//! [`ExceptionLogger`]. Logging is best-effort: sink errors and panics are
//! swallowed so they can never delay or fail the response.

use crate::exception::BoxError;
use crate::severity::LogLevel;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

/// Structured fields attached to a log record
pub type LogContext = BTreeMap<String, String>;

pub const IDENTIFIER: &str = "identifier";
pub const HTTP_METHOD: &str = "http_method";
pub const REQUEST_URI: &str = "request_uri";

/// External logger sink
pub trait ExceptionLogger: Send + Sync + 'static {
    fn log(&self, level: LogLevel, message: &str, context: &LogContext) -> Result<(), BoxError>;
}

/// A logger that emits `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ExceptionLogger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str, context: &LogContext) -> Result<(), BoxError> {
        let identifier = field(context, IDENTIFIER);
        let http_method = field(context, HTTP_METHOD);
        let request_uri = field(context, REQUEST_URI);

        match level {
            LogLevel::Emergency | LogLevel::Alert | LogLevel::Critical | LogLevel::Error => {
                tracing::error!(
                    severity = %level,
                    identifier,
                    http_method,
                    request_uri,
                    "{}",
                    message
                )
            }
            LogLevel::Warning => {
                tracing::warn!(
                    severity = %level,
                    identifier,
                    http_method,
                    request_uri,
                    "{}",
                    message
                )
            }
            LogLevel::Notice | LogLevel::Info => {
                tracing::info!(
                    severity = %level,
                    identifier,
                    http_method,
                    request_uri,
                    "{}",
                    message
                )
            }
            LogLevel::Debug => {
                tracing::debug!(
                    severity = %level,
                    identifier,
                    http_method,
                    request_uri,
                    "{}",
                    message
                )
            }
        }

        Ok(())
    }
}

fn field<'a>(context: &'a LogContext, key: &str) -> &'a str {
    context.get(key).map(String::as_str).unwrap_or_default()
}

/// Forward a record to `logger`, swallowing errors and panics
pub(crate) fn log_best_effort(
    logger: &dyn ExceptionLogger,
    level: LogLevel,
    message: &str,
    context: &LogContext,
) {
    match panic::catch_unwind(AssertUnwindSafe(|| logger.log(level, message, context))) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::warn!("Exception logger failed: {}", e);
        }
        Err(_) => {
            tracing::warn!("Exception logger panicked");
        }
    }
}
