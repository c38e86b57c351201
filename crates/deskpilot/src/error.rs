use std::io;
use std::path::PathBuf;

use deskpilot_daemon::StoreError;
use deskpilot_protocol::ErrorCategory;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),
    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CliError::Store(e) => e.code().category(),
            CliError::RecipeNotFound(_) => ErrorCategory::NotFound,
            CliError::Read { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                ErrorCategory::NotFound
            }
            CliError::Read { source, .. } if source.kind() == io::ErrorKind::PermissionDenied => {
                ErrorCategory::Permission
            }
            CliError::Read { .. } | CliError::Output(_) | CliError::Encode(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// sysexits-style process exit code.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::InvalidInput => 64, // EX_USAGE
            ErrorCategory::NotFound => 69,     // EX_UNAVAILABLE
            ErrorCategory::Internal => 74,     // EX_IOERR
            ErrorCategory::Permission => 77,   // EX_NOPERM
        }
    }
}
