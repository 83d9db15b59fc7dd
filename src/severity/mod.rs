//! Log severity resolution
//!
//! Low-level faults may carry a [`FaultSeverity`] tag (by being, or wrapping, a
//! [`RuntimeFault`]). [`SeverityMap`] resolves the log level of a dispatched
//! exception by walking past Internal Server Error wrappers down to the fault
//! that started it all.

use crate::exception::{BoxError, HttpException};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Log levels understood by exception loggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

/// Severity tag of a low-level fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum FaultSeverity {
    /// Unrecoverable failure
    Fatal,
    /// Malformed input the process could not make sense of
    Parse,
    /// Failure the process survived
    Recoverable,
    Warning,
    Notice,
    /// Discouraged but valid usage
    Strict,
    Deprecation,
}

impl FaultSeverity {
    fn default_level(self) -> LogLevel {
        match self {
            FaultSeverity::Fatal | FaultSeverity::Parse => LogLevel::Alert,
            FaultSeverity::Recoverable => LogLevel::Error,
            FaultSeverity::Warning | FaultSeverity::Strict | FaultSeverity::Deprecation => {
                LogLevel::Warning
            }
            FaultSeverity::Notice => LogLevel::Notice,
        }
    }
}

/// A low-level fault tagged with its severity
#[derive(Debug)]
pub struct RuntimeFault {
    severity: FaultSeverity,
    message: String,
    source: Option<BoxError>,
}

impl RuntimeFault {
    pub fn new(severity: FaultSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            source: None,
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(FaultSeverity::Fatal, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FaultSeverity::Warning, message)
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self::new(FaultSeverity::Notice, message)
    }

    pub fn deprecation(message: impl Into<String>) -> Self {
        Self::new(FaultSeverity::Deprecation, message)
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn severity(&self) -> FaultSeverity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RuntimeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

impl Error for RuntimeFault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn Error + 'static))
    }
}

/// Immutable mapping from fault severity to log level.
///
/// Built once during configuration; [`SeverityMap::default`] holds the stock
/// table and [`SeverityMap::with`] overrides single entries.
#[derive(Debug, Clone)]
pub struct SeverityMap {
    levels: HashMap<FaultSeverity, LogLevel>,
}

impl Default for SeverityMap {
    fn default() -> Self {
        Self {
            levels: FaultSeverity::iter()
                .map(|severity| (severity, severity.default_level()))
                .collect(),
        }
    }
}

impl SeverityMap {
    /// Create a map with no entries, every exception resolves to `error`
    pub fn empty() -> Self {
        Self {
            levels: HashMap::new(),
        }
    }

    pub fn with(mut self, severity: FaultSeverity, level: LogLevel) -> Self {
        self.levels.insert(severity, level);
        self
    }

    pub fn level_for(&self, severity: FaultSeverity) -> Option<LogLevel> {
        self.levels.get(&severity).copied()
    }

    /// Resolve the log level for a dispatched exception.
    ///
    /// Walks the cause chain while the current fault is an Internal Server
    /// Error with a cause, then maps the terminal fault's severity tag.
    /// Untagged faults resolve to [`LogLevel::Error`].
    pub fn resolve(&self, exception: &HttpException) -> LogLevel {
        let mut current: &(dyn Error + 'static) = exception;

        while let Some(http) = current.downcast_ref::<HttpException>() {
            match http.source() {
                Some(cause) if http.is_internal_server_error() => current = cause,
                _ => break,
            }
        }

        current
            .downcast_ref::<RuntimeFault>()
            .and_then(|fault| self.level_for(fault.severity()))
            .unwrap_or(LogLevel::Error)
    }
}
