use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExceptionError>;

/// Errors raised while configuring the exception subsystem.
///
/// Dispatching never fails: these only surface at build/configuration time.
#[derive(Debug, Error)]
pub enum ExceptionError {
    #[error("No default exception handler configured")]
    MissingDefaultHandler,

    #[error("Invalid HTTP status code: {0}")]
    InvalidStatusCode(u16),

    #[error("Invalid configuration value for {key}: {message}")]
    Config { key: String, message: String },
}

impl ExceptionError {
    /// Create a configuration error
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            message: message.into(),
        }
    }
}
