//! Stable error codes carried in the `error.code` field of a response.
//!
//! The numeric values are part of the wire contract and must never be
//! renumbered: clients match on them.

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ErrorCode {
    NotFound,
    InvalidParams,
    PermissionDenied,
    InternalError,
    MethodNotFound,
}

impl ErrorCode {
    pub const fn as_i32(self) -> i32 {
        match self {
            ErrorCode::NotFound => -1,
            ErrorCode::InvalidParams => -2,
            ErrorCode::PermissionDenied => -3,
            ErrorCode::InternalError => -4,
            ErrorCode::MethodNotFound => -5,
        }
    }

    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            -1 => Some(ErrorCode::NotFound),
            -2 => Some(ErrorCode::InvalidParams),
            -3 => Some(ErrorCode::PermissionDenied),
            -4 => Some(ErrorCode::InternalError),
            -5 => Some(ErrorCode::MethodNotFound),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NotFound => "notFound",
            ErrorCode::InvalidParams => "invalidParams",
            ErrorCode::PermissionDenied => "permissionDenied",
            ErrorCode::InternalError => "internalError",
            ErrorCode::MethodNotFound => "methodNotFound",
        }
    }

    /// Returns the error category for programmatic handling.
    pub fn category(self) -> ErrorCategory {
        match self {
            ErrorCode::NotFound => ErrorCategory::NotFound,
            ErrorCode::InvalidParams | ErrorCode::MethodNotFound => ErrorCategory::InvalidInput,
            ErrorCode::PermissionDenied => ErrorCategory::Permission,
            ErrorCode::InternalError => ErrorCategory::Internal,
        }
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.as_i32()
    }
}

impl TryFrom<i32> for ErrorCode {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        ErrorCode::from_i32(code).ok_or_else(|| format!("unknown error code {}", code))
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.as_str(), self.as_i32())
    }
}

/// Error category for programmatic handling by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Target app, element or stored artifact not found
    NotFound,
    /// Invalid input parameters or unknown method
    InvalidInput,
    /// The host refused access (accessibility permission)
    Permission,
    /// Internal failure
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::InvalidInput => "invalid_input",
            ErrorCategory::Permission => "permission",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ErrorCode::NotFound.as_i32(), -1);
        assert_eq!(ErrorCode::InvalidParams.as_i32(), -2);
        assert_eq!(ErrorCode::PermissionDenied.as_i32(), -3);
        assert_eq!(ErrorCode::InternalError.as_i32(), -4);
        assert_eq!(ErrorCode::MethodNotFound.as_i32(), -5);
    }

    #[test]
    fn test_from_i32_rejects_unknown_codes() {
        assert_eq!(ErrorCode::from_i32(-4), Some(ErrorCode::InternalError));
        assert_eq!(ErrorCode::from_i32(0), None);
        assert_eq!(ErrorCode::from_i32(-32601), None);
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&ErrorCode::MethodNotFound).unwrap();
        assert_eq!(json, "-5");

        let code: ErrorCode = serde_json::from_str("-3").unwrap();
        assert_eq!(code, ErrorCode::PermissionDenied);

        assert!(serde_json::from_str::<ErrorCode>("-9").is_err());
    }

    #[test]
    fn test_category_for_code() {
        assert_eq!(ErrorCode::NotFound.category(), ErrorCategory::NotFound);
        assert_eq!(
            ErrorCode::InvalidParams.category(),
            ErrorCategory::InvalidInput
        );
        assert_eq!(
            ErrorCode::MethodNotFound.category(),
            ErrorCategory::InvalidInput
        );
        assert_eq!(
            ErrorCode::PermissionDenied.category(),
            ErrorCategory::Permission
        );
        assert_eq!(ErrorCode::InternalError.category(), ErrorCategory::Internal);
        assert_eq!(ErrorCategory::InvalidInput.as_str(), "invalid_input");
    }

    #[test]
    fn test_display_includes_name_and_number() {
        assert_eq!(ErrorCode::NotFound.to_string(), "notFound(-1)");
    }
}
