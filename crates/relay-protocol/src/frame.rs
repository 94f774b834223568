//! Reference wire envelope.
//!
//! The shipped JSON-lines codec puts one [`Envelope`] per line on the wire.
//! Binary fields are base64-encoded so the envelope survives any
//! text-oriented transport. Transports with their own framing are free to
//! ignore this module entirely.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::payload::Payload;
use crate::PROTOCOL_VERSION;

/// Versioned wrapper around a single frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Protocol version of the sender.
    pub v: i32,
    /// The frame itself, tagged by kind.
    #[serde(flatten)]
    pub frame: Frame,
}

/// One frame of the relay conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Frame {
    /// Host → worker: one request unit. `body` and `context` are base64.
    Request {
        body: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<String>,
    },
    /// Worker → host: normal textual response.
    Response { text: String },
    /// Worker → host: error signal.
    Error { text: String },
}

impl Frame {
    /// Kind tag as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Request { .. } => "request",
            Self::Response { .. } => "response",
            Self::Error { .. } => "error",
        }
    }
}

impl Envelope {
    /// Build a request envelope from a payload.
    pub fn request(payload: &Payload) -> Self {
        Self {
            v: PROTOCOL_VERSION,
            frame: Frame::Request {
                body: BASE64.encode(&payload.body),
                context: payload.context.as_deref().map(|c| BASE64.encode(c)),
            },
        }
    }

    /// Build a response envelope.
    pub fn response(text: impl Into<String>) -> Self {
        Self {
            v: PROTOCOL_VERSION,
            frame: Frame::Response { text: text.into() },
        }
    }

    /// Build an error-signal envelope.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            v: PROTOCOL_VERSION,
            frame: Frame::Error { text: text.into() },
        }
    }

    /// Extract the payload from a request envelope.
    ///
    /// Response and error frames are outbound-only; receiving one is a
    /// protocol violation.
    pub fn into_payload(self) -> Result<Payload, ProtocolError> {
        match self.frame {
            Frame::Request { body, context } => {
                let body = BASE64
                    .decode(&body)
                    .map_err(|e| ProtocolError::invalid_frame(format!("bad body base64: {}", e)))?;
                let context = match context {
                    Some(c) => Some(BASE64.decode(&c).map_err(|e| {
                        ProtocolError::invalid_frame(format!("bad context base64: {}", e))
                    })?),
                    None => None,
                };
                Ok(Payload { body, context })
            }
            frame => Err(ProtocolError::UnexpectedFrame { kind: frame.kind() }),
        }
    }
}
