//! Error types for identity and asset parsing
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Errors raised when decoding identities or asset selectors from text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid hex encoding: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
