//! Error types for the panel engine
//!
//! Pointer handling never fails; it skips work instead. These errors cover
//! the setup paths: configuration parsing, handle registration and
//! element lookup.

use crate::types::ElementId;

/// Errors that can occur while configuring or wiring a panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// Element handle does not resolve on the host
    ElementNotBound(ElementId),

    /// No drag or resize handle registered under this name
    UnknownHandle(String),

    /// A handle with this name is already registered
    DuplicateHandle(String),

    /// Quality level could not be recognized
    InvalidQuality(String),

    /// Configuration could not be parsed
    ConfigError(String),
}

impl std::fmt::Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ElementNotBound(id) => write!(f, "element not bound: {}", id),
            Self::UnknownHandle(name) => write!(f, "unknown handle: {}", name),
            Self::DuplicateHandle(name) => write!(f, "duplicate handle: {}", name),
            Self::InvalidQuality(value) => write!(f, "invalid quality: {}", value),
            Self::ConfigError(msg) => write!(f, "config error: {}", msg),
        }
    }
}

impl std::error::Error for PanelError {}

impl From<serde_json::Error> for PanelError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}

/// Result type alias for panel setup operations
pub type PanelResult<T> = Result<T, PanelError>;
