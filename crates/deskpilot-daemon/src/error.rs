//! Error types for the dispatch, recording and storage layers.
//!
//! Errors that can reach the wire expose `code()`; the dispatcher decides the
//! code for collaborator failures per method, so [`ActionError`] has none.

use std::io;
use std::path::PathBuf;

use deskpilot_protocol::ErrorCode;
use thiserror::Error;

/// Failure reported by the action executor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),
    #[error("Application not found: {0}")]
    AppNotFound(String),
    #[error("Unknown key: {0}")]
    UnknownKey(String),
    #[error("Accessibility permission denied")]
    PermissionDenied,
    #[error("{0}")]
    Failed(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotificationError {
    #[error("Process {0} cannot be observed")]
    Unobservable(i32),
    #[error("Subscription failed: {0}")]
    Failed(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecorderError {
    #[error("Recording already in progress: {0}")]
    AlreadyActive(String),
    #[error("Invalid recording name '{0}'")]
    InvalidName(String),
}

impl RecorderError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::InvalidParams
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to {operation} '{}': {source}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Corrupt {kind} file '{}': {source}", .path.display())]
    Corrupt {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),
    #[error("Invalid name '{0}': names cannot be empty or contain path separators")]
    InvalidName(String),
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },
}

impl StoreError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::NotFound { .. } => ErrorCode::NotFound,
            StoreError::InvalidRecipe(_) | StoreError::InvalidName(_) => ErrorCode::InvalidParams,
            StoreError::Io { source, .. } if source.kind() == io::ErrorKind::PermissionDenied => {
                ErrorCode::PermissionDenied
            }
            StoreError::Io { .. } | StoreError::Serialize { .. } | StoreError::Corrupt { .. } => {
                ErrorCode::InternalError
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReplayError {
    #[error("Missing value for recipe parameter '{0}'")]
    MissingValue(String),
    #[error("Step {index} calls '{method}', which cannot run inside a recipe")]
    MetaCommand { index: usize, method: String },
}

impl ReplayError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::InvalidParams
    }
}
