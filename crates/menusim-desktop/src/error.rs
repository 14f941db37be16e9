//! Error types for configuration and content loading
//!
//! Gameplay paths never fail: empty pools and invalid transitions degrade to
//! "nothing happens". Only the loaders surface errors.

use std::fmt;

/// Errors that can occur while loading a [`SimConfig`](crate::SimConfig)
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Input was not valid JSON for the config shape
    Parse(String),

    /// A random interval has `min > max`
    InvertedInterval {
        field: &'static str,
        min: f64,
        max: f64,
    },

    /// A duration, rate or size that must be positive was not
    NotPositive {
        field: &'static str,
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
            ConfigError::InvertedInterval { field, min, max } => {
                write!(f, "Invalid interval for {}: min {} exceeds max {}", field, min, max)
            }
            ConfigError::NotPositive { field, value } => {
                write!(f, "Invalid value for {}: {} must be positive", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Errors that can occur while loading [`ContentPools`](crate::ContentPools)
#[derive(Clone, Debug, PartialEq)]
pub enum ContentError {
    /// Input was not valid JSON for the content shape
    Parse(String),

    /// A caller-specific script was registered with no lines
    EmptyScript(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Parse(msg) => write!(f, "Content parse error: {}", msg),
            ContentError::EmptyScript(caller) => {
                write!(f, "Script for caller '{}' has no lines", caller)
            }
        }
    }
}

impl std::error::Error for ContentError {}

impl From<serde_json::Error> for ContentError {
    fn from(e: serde_json::Error) -> Self {
        ContentError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvertedInterval {
            field: "modal_interval_ms",
            min: 60000.0,
            max: 30000.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid interval for modal_interval_ms: min 60000 exceeds max 30000"
        );
    }

    #[test]
    fn test_content_error_from_json() {
        let json_err = serde_json::from_str::<Vec<u32>>("[1,").unwrap_err();
        let err: ContentError = json_err.into();
        assert!(matches!(err, ContentError::Parse(_)));
    }
}
