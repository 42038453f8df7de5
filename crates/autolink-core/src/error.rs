//! Errors raised while detecting and weaving links.

use thiserror::Error;

/// Failure reported by a base detector.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("Malformed input: {reason}")]
    Malformed { reason: String },

    #[error("Input of {len} bytes exceeds the detector limit of {max} bytes")]
    InputTooLarge { len: usize, max: usize },

    #[error("Detector failure: {0}")]
    Internal(String),
}

/// Failure of a whole weave pass. A pass never produces partial output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeaveError {
    #[error("Base detection failed: {0}")]
    Detection(#[from] DetectionError),
}

impl WeaveError {
    /// Returns a helpful suggestion for resolving the error.
    pub fn suggestion(&self) -> String {
        match self {
            WeaveError::Detection(DetectionError::Malformed { .. }) => {
                "The input could not be scanned. Check that it is valid UTF-8 text.".to_string()
            }
            WeaveError::Detection(DetectionError::InputTooLarge { max, .. }) => {
                format!("Split the input into chunks of at most {max} bytes.")
            }
            WeaveError::Detection(DetectionError::Internal(_)) => {
                "The detector failed internally. Run with --verbose for details.".to_string()
            }
        }
    }

    /// Passes are deterministic for a given input, so retrying never helps.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
