use crate::error::{ExceptionError, Result};
use dashmap::DashMap;
use serde::Deserialize;
use std::env;
use std::sync::Arc;

pub const DEBUG_KEY: &str = "EXCEPTION_DEBUG";
pub const HEADLESS_KEY: &str = "EXCEPTION_HEADLESS";
pub const ESCAPE_OUTPUT_KEY: &str = "EXCEPTION_ESCAPE_OUTPUT";

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Create a service seeded from the process environment
    pub fn from_env() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    /// Read a flag: `1`, `true`, `yes`, `on` are true and `0`, `false`, `no`,
    /// `off` or an empty value are false (case-insensitive)
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };

        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" | "" => Ok(Some(false)),
            other => Err(ExceptionError::config(
                key,
                format!("expected a boolean, got '{}'", other),
            )),
        }
    }
}

/// Runtime switches of the exception manager
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExceptionConfig {
    /// Attach a filtered call trace to rendered output
    pub debug: bool,
    /// Non-interactive invocation: always answer in plain text
    pub headless: bool,
    /// Escape identifier and message in json/xml/html output
    pub escape_output: bool,
}

impl ExceptionConfig {
    pub fn from_service(service: &ConfigService) -> Result<Self> {
        Ok(Self {
            debug: service.get_bool(DEBUG_KEY)?.unwrap_or(false),
            headless: service.get_bool(HEADLESS_KEY)?.unwrap_or(false),
            escape_output: service.get_bool(ESCAPE_OUTPUT_KEY)?.unwrap_or(false),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_service(&ConfigService::from_env())
    }

    pub fn from_json(document: &str) -> Result<Self> {
        serde_json::from_str(document).map_err(|e| ExceptionError::config("json", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_service() {
        let service = ConfigService::default();
        service.set(DEBUG_KEY, "Yes");
        service.set(HEADLESS_KEY, "0");

        let config = ExceptionConfig::from_service(&service).unwrap();
        assert_eq!(
            config,
            ExceptionConfig {
                debug: true,
                headless: false,
                escape_output: false,
            }
        );
    }

    #[test]
    fn test_invalid_flag() {
        let service = ConfigService::default();
        service.set(ESCAPE_OUTPUT_KEY, "maybe");

        let err = ExceptionConfig::from_service(&service).unwrap_err();
        assert!(matches!(err, ExceptionError::Config { ref key, .. } if key == ESCAPE_OUTPUT_KEY));
    }

    #[test]
    fn test_from_json_defaults_missing_fields() {
        let config = ExceptionConfig::from_json(r#"{"headless": true}"#).unwrap();
        assert!(config.headless);
        assert!(!config.debug);

        assert!(ExceptionConfig::from_json("{").is_err());
    }
}
