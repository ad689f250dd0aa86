//! # Errors
//!
//! Every fallible operation in the harness returns [`HarnessError`]. Oracle
//! checks return the narrower [`ContractViolation`], which converts into it.

use thiserror::Error;

/// Mismatch between what the service answered and what the contract says.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("contract violation: expected {expected}, got {actual}")]
pub struct ContractViolation {
    pub expected: String,
    pub actual: String,
}

impl ContractViolation {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {context}: {source}")]
    Encode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The service state a scenario relies on is not there; nothing was checked.
    #[error("precondition not met: {0}")]
    Precondition(String),

    #[error(transparent)]
    Contract(#[from] ContractViolation),

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

impl HarnessError {
    pub(crate) fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        HarnessError::Decode {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn encode(context: impl Into<String>, source: serde_json::Error) -> Self {
        HarnessError::Encode {
            context: context.into(),
            source,
        }
    }
}
