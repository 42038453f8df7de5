//! Command line errors with categories, suggestions and sysexits codes.

use std::io;
use std::path::PathBuf;

use autolink_core::DetectionError;
use autolink_core::WeaveError;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidInput,
    External,
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::InvalidInput => "invalid_input",
            ErrorCategory::External => "external",
            ErrorCategory::Internal => "internal",
        }
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read {}: {}", input_name(path), source)]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Weave(#[from] WeaveError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn input_name(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map_or_else(|| "standard input".to_string(), |p| p.display().to_string())
}

impl CliError {
    pub fn io(path: Option<PathBuf>, source: io::Error) -> Self {
        CliError::Io { path, source }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CliError::Io { .. } => ErrorCategory::External,
            CliError::InvalidInput(_) => ErrorCategory::InvalidInput,
            CliError::Weave(WeaveError::Detection(err)) => match err {
                DetectionError::Malformed { .. } | DetectionError::InputTooLarge { .. } => {
                    ErrorCategory::InvalidInput
                }
                DetectionError::Internal(_) => ErrorCategory::Internal,
            },
        }
    }

    pub fn suggestion(&self) -> String {
        match self {
            CliError::Io { path: Some(_), .. } => {
                "Check that the file exists and is readable UTF-8 text.".to_string()
            }
            CliError::Io { path: None, .. } => {
                "Pass the text as an argument, with --file, or pipe UTF-8 text on stdin."
                    .to_string()
            }
            CliError::Weave(err) => err.suggestion(),
            CliError::InvalidInput(_) => "Run 'autolink --help' for usage.".to_string(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            CliError::Io { source, .. } => matches!(
                source.kind(),
                io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
            ),
            CliError::Weave(err) => err.is_retryable(),
            CliError::InvalidInput(_) => false,
        }
    }

    /// Converts to UNIX sysexits.h-compliant exit code.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::InvalidInput => 64, // EX_USAGE
            ErrorCategory::External => 74,     // EX_IOERR
            ErrorCategory::Internal => 70,     // EX_SOFTWARE
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "message": self.to_string(),
            "category": self.category().as_str(),
            "retryable": self.is_retryable(),
            "suggestion": self.suggestion()
        })
    }
}
