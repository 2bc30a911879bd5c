use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum LibraryError {
    // malformed input such as an empty isbn/name or a non-positive quantity
    InvalidArgument {
        message: String,
        reason_code: Option<String>,
    },
    NotFound {
        message: String,
    },
    // no free copies are left to issue
    Unavailable {
        message: String,
        reason_code: Option<String>,
    },
    AlreadyReturned {
        message: String,
    },
    // the byte store could not be read, decoded or written
    PersistenceFailure {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn invalid_argument(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::InvalidArgument { message: message.to_string(), reason_code }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Unavailable { message: message.to_string(), reason_code }
    }

    pub fn already_returned(message: &str) -> LibraryError {
        LibraryError::AlreadyReturned { message: message.to_string() }
    }

    pub fn persistence(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::PersistenceFailure { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::InvalidArgument { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::Unavailable { .. } => { false }
            LibraryError::AlreadyReturned { .. } => { false }
            LibraryError::PersistenceFailure { .. } => { true }
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::persistence(
            format!("store io {:?}", err).as_str(), Some(format!("{:?}", err.kind())))
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::persistence(
            format!("serde json parsing {:?}", err).as_str(), None)
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::InvalidArgument { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Unavailable { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::AlreadyReturned { message } => {
                write!(f, "{}", message)
            }
            LibraryError::PersistenceFailure { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for the lending domain.
pub type LibraryResult<T> = Result<T, LibraryError>;

// LoanStatus is derived from returned_on and never persisted on its own.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum LoanStatus {
    Open,
    Returned,
}

#[cfg(test)]
mod tests {
    use crate::core::library::{LibraryError, LoanStatus};

    #[tokio::test]
    async fn test_should_create_invalid_argument_error() {
        assert!(matches!(LibraryError::invalid_argument("test", None), LibraryError::InvalidArgument{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_unavailable_error() {
        assert!(matches!(LibraryError::unavailable("test", None), LibraryError::Unavailable{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_already_returned_error() {
        assert!(matches!(LibraryError::already_returned("test"), LibraryError::AlreadyReturned{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_convert_io_error_to_persistence() {
        let err = LibraryError::from(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
        assert!(matches!(err, LibraryError::PersistenceFailure{ message: _, reason_code: Some(_) }));
    }

    #[tokio::test]
    async fn test_should_convert_json_error_to_persistence() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").expect_err("should fail");
        assert!(matches!(LibraryError::from(json_err), LibraryError::PersistenceFailure{ .. }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert!(!LibraryError::invalid_argument("test", None).retryable());
        assert!(!LibraryError::not_found("test").retryable());
        assert!(!LibraryError::unavailable("test", None).retryable());
        assert!(!LibraryError::already_returned("test").retryable());
        assert!(LibraryError::persistence("test", None).retryable());
    }

    #[tokio::test]
    async fn test_should_encode_loan_status_by_name() {
        assert_eq!(serde_json::json!("Returned"), serde_json::to_value(LoanStatus::Returned).expect("should encode"));
        assert!(serde_json::from_str::<LoanStatus>(r#""Lost""#).is_err());
    }
}
