//! Error types for the relay protocol.

use thiserror::Error;

/// Failure converting a payload to its textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The body is not valid UTF-8 and has no textual form.
    #[error("payload body is not valid UTF-8 (valid up to byte {valid_up_to})")]
    NotText {
        /// Length of the longest valid prefix.
        valid_up_to: usize,
    },
}

/// Failure decoding or validating a wire frame.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Malformed envelope: bad JSON, bad base64, or missing fields.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// A response or error frame arrived on the inbound path.
    #[error("unexpected {kind} frame on the inbound path")]
    UnexpectedFrame {
        /// Kind tag of the offending frame.
        kind: &'static str,
    },

    /// Envelope version is outside the supported range.
    #[error("protocol version {requested} is outside supported range [{min}, {max}]")]
    UnsupportedVersion { requested: i32, min: i32, max: i32 },

    /// Encoded frame exceeds the configured size cap.
    #[error("frame of {size} bytes exceeds maximum {max}")]
    FrameTooLarge { size: usize, max: usize },
}

impl ProtocolError {
    /// Create an invalid-frame error.
    pub fn invalid_frame(message: impl Into<String>) -> Self {
        Self::InvalidFrame(message.into())
    }
}
