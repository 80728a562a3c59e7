use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    NotFound {
        message: String,
    },
    DuplicateKey {
        message: String,
    },
    Conflict {
        message: String,
    },
    Storage {
        message: String,
        retryable: bool,
    },
    Serialization {
        message: String,
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
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Decode { .. } => {
                CommandError::Serialization { message: other.to_string() }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::AlreadyBorrowed { .. } => {
                CommandError::Conflict { message: other.to_string() }
            }
            LibraryError::NotBorrowed { message } => {
                CommandError::Conflict { message }
            }
            LibraryError::Io { message, .. } => {
                CommandError::Storage { message, retryable }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
        }
    }
}
