//! Request payload type.

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;

/// One request unit pulled from the relay channel.
///
/// The body is opaque bytes. The optional context blob is defined by the
/// transport that framed the request; it is carried alongside the body and
/// never interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Raw request body.
    pub body: Vec<u8>,
    /// Transport-defined metadata blob.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<u8>>,
}

impl Payload {
    /// Create a payload with no context.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            context: None,
        }
    }

    /// Create a payload carrying a context blob.
    pub fn with_context(body: impl Into<Vec<u8>>, context: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            context: Some(context.into()),
        }
    }

    /// Create a payload from a textual body.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.as_bytes())
    }

    /// True when the body has zero length.
    ///
    /// Relay transports use the empty payload as the terminal request that
    /// ends a worker session.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// The textual form of the body.
    ///
    /// This is a total conversion: it succeeds only for valid UTF-8 and
    /// reports anything else as a [`PayloadError::NotText`] failure. There
    /// is no lossy fallback.
    pub fn text(&self) -> Result<&str, PayloadError> {
        std::str::from_utf8(&self.body).map_err(|e| PayloadError::NotText {
            valid_up_to: e.valid_up_to(),
        })
    }
}
