use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug, PartialEq)]
pub enum CommandError {
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    NotFound {
        message: String,
    },
    Unavailable {
        message: String,
        reason_code: Option<String>,
    },
    Conflict {
        message: String,
    },
    Storage {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        let retryable = other.retryable();
        match other {
            LibraryError::InvalidArgument { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::Unavailable { message, reason_code } => {
                CommandError::Unavailable { message, reason_code }
            }
            LibraryError::AlreadyReturned { message } => {
                CommandError::Conflict { message }
            }
            LibraryError::PersistenceFailure { message, reason_code } => {
                CommandError::Storage { message, reason_code, retryable }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_convert_library_errors() {
        assert!(matches!(CommandError::from(LibraryError::invalid_argument("test", None)), CommandError::Validation { .. }));
        assert!(matches!(CommandError::from(LibraryError::not_found("test")), CommandError::NotFound { .. }));
        assert!(matches!(CommandError::from(LibraryError::unavailable("test", None)), CommandError::Unavailable { .. }));
        assert!(matches!(CommandError::from(LibraryError::already_returned("test")), CommandError::Conflict { .. }));
        assert!(matches!(CommandError::from(LibraryError::persistence("test", None)), CommandError::Storage { retryable: true, .. }));
    }
}
