//! Structured error types shared across fmpart crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`FmError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (identifiers, sizes, etc.).
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
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the fmpart engine.
///
/// Only recoverable input problems are reported through this type. Broken
/// engine invariants (selecting from an empty queue, gain keys escaping the
/// queue range) panic instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum FmError {
    /// Netlist structural errors.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Invalid partition assignments or hierarchy projections.
    #[error("partition error: {0}")]
    Partition(ErrorInfo),
    /// Invalid engine or run configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Filesystem errors raised at the edges of the engine.
    #[error("io error: {0}")]
    Io(ErrorInfo),
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

impl FmError {
    /// Builds a [`FmError::Graph`] error.
    pub fn graph(code: impl Into<String>, message: impl Into<String>) -> Self {
        FmError::Graph(ErrorInfo::new(code, message))
    }

    /// Builds a [`FmError::Partition`] error.
    pub fn partition(code: impl Into<String>, message: impl Into<String>) -> Self {
        FmError::Partition(ErrorInfo::new(code, message))
    }

    /// Builds a [`FmError::Config`] error.
    pub fn config(code: impl Into<String>, message: impl Into<String>) -> Self {
        FmError::Config(ErrorInfo::new(code, message))
    }

    /// Builds a [`FmError::Serde`] error.
    pub fn serde(code: impl Into<String>, message: impl Into<String>) -> Self {
        FmError::Serde(ErrorInfo::new(code, message))
    }

    /// Wraps an I/O failure on `path`.
    pub fn io(err: &std::io::Error, path: impl AsRef<std::path::Path>) -> Self {
        FmError::Io(
            ErrorInfo::new("io", err.to_string())
                .with_context("path", path.as_ref().display().to_string()),
        )
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            FmError::Graph(info)
            | FmError::Partition(info)
            | FmError::Config(info)
            | FmError::Serde(info)
            | FmError::Io(info) => info,
        }
    }

    /// Adds a context entry to the payload, keeping the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        self.map_info(|info| info.with_context(key, value.to_string()))
    }

    /// Attaches a remediation hint, keeping the error family.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        self.map_info(|info| info.with_hint(hint))
    }

    fn map_info(self, f: impl FnOnce(ErrorInfo) -> ErrorInfo) -> Self {
        match self {
            FmError::Graph(info) => FmError::Graph(f(info)),
            FmError::Partition(info) => FmError::Partition(f(info)),
            FmError::Config(info) => FmError::Config(f(info)),
            FmError::Serde(info) => FmError::Serde(f(info)),
            FmError::Io(info) => FmError::Io(f(info)),
        }
    }
}
