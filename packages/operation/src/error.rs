//! Error types for the token codec.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Errors that can occur while decoding a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The token is not a valid encoded operation.
    #[error("Malformed token {token:?}: {reason}")]
    MalformedToken {
        /// The offending token.
        token: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl CodecError {
    pub(crate) fn malformed(token: &str, reason: impl Into<String>) -> Self {
        Self::MalformedToken {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

/// A string that is not one of the opcode names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown opcode {0:?}")]
pub struct ParseOpcodeError(pub String);
