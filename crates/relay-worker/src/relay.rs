//! The duplex relay channel abstraction.
//!
//! A relay is the only resource a worker owns. The wire framing behind it
//! is a transport concern: the worker loop sees three operations and
//! nothing else.

use std::io;

use relay_protocol::{Payload, ProtocolError};
use thiserror::Error;

/// Failure of the relay channel itself.
///
/// Relay errors are the worker's own failure domain: unlike request-level
/// failures they cannot be reported through the channel and terminate the
/// loop.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Transport I/O failure.
    #[error("relay I/O: {0}")]
    Io(#[from] io::Error),

    /// Frame decoding or validation failure.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The channel was closed mid-operation; a write can no longer reach
    /// the peer.
    #[error("relay channel closed")]
    Closed,
}

/// A duplex channel carrying request payloads in and textual replies out.
///
/// `receive` blocks until the next request arrives or the stream ends.
/// `send` and `error` each perform exactly one channel write and flush it.
pub trait Relay {
    /// Pull the next request unit. `Ok(None)` is end-of-stream.
    fn receive(&mut self) -> Result<Option<Payload>, RelayError>;

    /// Write one normal response.
    fn send(&mut self, text: &str) -> Result<(), RelayError>;

    /// Write one error signal.
    fn error(&mut self, text: &str) -> Result<(), RelayError>;
}
