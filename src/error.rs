use std::fmt::Display;
use std::time::Duration;

use thiserror::Error;

use crate::locator::Readiness;

pub type Result<T> = std::result::Result<T, ProbeError>;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Timed out after {timeout:?} waiting for {selector} to be {readiness}")]
    Timeout {
        selector: String,
        readiness: Readiness,
        timeout: Duration,
    },

    #[error("No option with visible text {label:?} in {selector}")]
    NoMatchingOption { selector: String, label: String },

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Results count label is not of the form (N): {0:?}")]
    UnparsableCount(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Expected status in {expected:?}, got {actual}")]
    UnexpectedStatus { expected: Vec<u16>, actual: u16 },

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProbeError {
    pub fn browser(err: impl Display) -> Self {
        Self::Browser(err.to_string())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Collapse a fallible query into a default value.
///
/// Page queries whose absence is itself a test outcome (a label that is not
/// shown, a count that cannot be read) use this instead of propagating.
pub trait ResultExt<T> {
    fn value_or(self, default: T) -> T;

    fn value_or_default(self) -> T
    where
        T: Default;
}

impl<T> ResultExt<T> for Result<T> {
    fn value_or(self, default: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!("Falling back to default: {}", err);
                default
            }
        }
    }

    fn value_or_default(self) -> T
    where
        T: Default,
    {
        self.value_or(T::default())
    }
}
