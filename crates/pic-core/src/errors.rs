//! Structured error types shared across PIC crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`PicError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (labels, dimensions, addresses, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the PIC toolkit.
///
/// Every failure is fatal to the current invocation; nothing in the toolkit
/// retries on any of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum PicError {
    /// Invalid shape or monitor parameters.
    #[error("geometry error: {0}")]
    Geometry(ErrorInfo),
    /// A component cannot be labelled or placed inside the sweep tile.
    #[error("packing error: {0}")]
    Packing(ErrorInfo),
    /// Connection, timeout or path translation failure in remote preview.
    #[error("transport error: {0}")]
    Transport(ErrorInfo),
    /// Failure reported by, or inconsistent results from, the external solver.
    #[error("solver error: {0}")]
    Solver(ErrorInfo),
    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl PicError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            PicError::Geometry(info)
            | PicError::Packing(info)
            | PicError::Transport(info)
            | PicError::Solver(info)
            | PicError::Config(info)
            | PicError::Serde(info) => info,
        }
    }

    /// Shorthand for a geometry error.
    pub fn geometry(code: impl Into<String>, message: impl Into<String>) -> Self {
        PicError::Geometry(ErrorInfo::new(code, message))
    }

    /// Shorthand for a packing error.
    pub fn packing(code: impl Into<String>, message: impl Into<String>) -> Self {
        PicError::Packing(ErrorInfo::new(code, message))
    }

    /// Shorthand for a transport error.
    pub fn transport(code: impl Into<String>, message: impl Into<String>) -> Self {
        PicError::Transport(ErrorInfo::new(code, message))
    }

    /// Shorthand for a solver error.
    pub fn solver(code: impl Into<String>, message: impl Into<String>) -> Self {
        PicError::Solver(ErrorInfo::new(code, message))
    }

    /// Shorthand for a configuration error.
    pub fn config(code: impl Into<String>, message: impl Into<String>) -> Self {
        PicError::Config(ErrorInfo::new(code, message))
    }
}
