//! Error values crossing the boundary
//!
//! The host-facing error taxonomy: user errors carry an inline message and
//! are always recoverable; resource errors are user errors with no message
//! (read back as a fixed "out of memory" string); structured errors carry a
//! code that resolves to a canonical name.

use std::sync::Arc;

use crate::error::EngineError;

use super::Value;

/// Structured code carried by an error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Malformed input or exhausted resources; carries an inline message
    User,
    /// Type mismatch reported by a bounds- or tag-checked operation
    Type,
    /// Index outside the addressable range
    Index,
    /// Structures that must agree in length do not
    Length,
    /// A required collaborator is not installed
    Missing,
}

impl ErrorCode {
    /// The canonical name for this code.
    pub fn name(self) -> &'static str {
        match self {
            ErrorCode::User => "user",
            ErrorCode::Type => "type",
            ErrorCode::Index => "index",
            ErrorCode::Length => "length",
            ErrorCode::Missing => "missing",
        }
    }
}

/// The payload of an error [`Value`].
///
/// A `User` error with no message means "out of memory, no message" - the
/// original allocation failed before a message could be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorValue {
    /// Structured code
    pub code: ErrorCode,
    /// Inline message, present for user errors that carry one
    pub message: Option<String>,
}

impl Value {
    /// Construct a user error carrying an inline message.
    pub fn err_user(message: impl Into<String>) -> Self {
        Value::Error(Arc::new(ErrorValue {
            code: ErrorCode::User,
            message: Some(message.into()),
        }))
    }

    /// Construct the out-of-memory error shape: a user error with no message.
    pub fn err_oom() -> Self {
        Value::Error(Arc::new(ErrorValue {
            code: ErrorCode::User,
            message: None,
        }))
    }

    /// Construct a structured error from a code.
    pub fn err_code(code: ErrorCode) -> Self {
        Value::Error(Arc::new(ErrorValue {
            code,
            message: None,
        }))
    }

    /// The structured code of an error value, `None` for non-errors.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Value::Error(e) => Some(e.code),
            _ => None,
        }
    }

    /// The human-readable message of an error value.
    ///
    /// For user errors this is the inline message, or the fixed
    /// `"Out of memory"` string when none was stored. For structured errors
    /// it is the canonical code name. Callers are expected to check
    /// [`Value::is_error`] first; misuse on a non-error value returns a
    /// generic message rather than reading unrelated data.
    pub fn error_message(&self) -> &str {
        match self {
            Value::Error(e) => match e.code {
                ErrorCode::User => e.message.as_deref().unwrap_or("Out of memory"),
                code => code.name(),
            },
            _ => "Unknown error",
        }
    }
}

impl From<EngineError> for Value {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::TypeMismatch { .. } => Value::err_code(ErrorCode::Type),
            EngineError::IndexOutOfBounds { .. } => Value::err_code(ErrorCode::Index),
            EngineError::LengthMismatch { .. } => Value::err_code(ErrorCode::Length),
            EngineError::MalformedInput(message) => Value::err_user(message),
            EngineError::AllocationLimit { .. } => Value::err_oom(),
            EngineError::CollaboratorMissing(_) => Value::err_code(ErrorCode::Missing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_message() {
        let err = Value::err_user("CSV has no lines");
        assert_eq!(err.error_code(), Some(ErrorCode::User));
        assert_eq!(err.error_message(), "CSV has no lines");
    }

    #[test]
    fn test_oom_error_message() {
        let err = Value::err_oom();
        assert_eq!(err.error_code(), Some(ErrorCode::User));
        assert_eq!(err.error_message(), "Out of memory");
    }

    #[test]
    fn test_structured_error_message() {
        let err = Value::err_code(ErrorCode::Index);
        assert_eq!(err.error_message(), "index");
    }

    #[test]
    fn test_misuse_is_defensive() {
        assert_eq!(Value::I64(1).error_message(), "Unknown error");
        assert_eq!(Value::Null.error_code(), None);
    }
}
