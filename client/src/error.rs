use std::fmt;

use thiserror::Error;

use crate::state::Control;

/// Backend operation an error belongs to. Each one carries its own
/// fallback wording for when the backend gives us nothing usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Upload,
    Ask,
    Health,
}

impl Operation {
    pub fn http_fallback(self) -> &'static str {
        match self {
            Operation::Upload => "Failed to upload PDF.",
            Operation::Ask => "Failed to get answer.",
            Operation::Health => "Backend health check failed.",
        }
    }

    pub fn unexpected_fallback(self) -> &'static str {
        match self {
            Operation::Upload => "Upload failed.",
            Operation::Ask => "Something went wrong.",
            Operation::Health => "Backend health check failed.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Upload => "upload",
            Operation::Ask => "ask",
            Operation::Health => "health",
        };
        f.write_str(name)
    }
}

/// Checks that run before any request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please choose a PDF first.")]
    NoFileSelected,
    #[error("Only PDF files are supported.")]
    NotPdf,
    #[error("Please upload a PDF before asking questions.")]
    NotUploaded,
    #[error("Please enter a question.")]
    EmptyQuestion,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Non-2xx response. `message` is the backend `detail` or the
    /// operation fallback.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Unexpected(String),

    #[error("a request is already in flight")]
    Busy,

    #[error("the {0} is disabled")]
    Disabled(Control),
}

impl ClientError {
    pub fn http(operation: Operation, status: u16, detail: Option<String>) -> Self {
        ClientError::Http {
            status,
            message: detail.unwrap_or_else(|| operation.http_fallback().to_string()),
        }
    }

    pub fn unexpected(operation: Operation, error: impl fmt::Display) -> Self {
        let message = error.to_string();
        if message.trim().is_empty() {
            ClientError::Unexpected(operation.unexpected_fallback().to_string())
        } else {
            ClientError::Unexpected(message)
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
