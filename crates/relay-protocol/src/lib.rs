//! Relay Protocol Types
//!
//! Defines the request payload and the reference wire envelope for
//! host↔worker communication over a duplex relay channel. The envelope is
//! what the shipped JSON-lines codec puts on the wire; transports with their
//! own framing only need the [`Payload`] type.

pub mod error;
pub mod frame;
pub mod payload;

pub use error::{PayloadError, ProtocolError};
pub use frame::{Envelope, Frame};
pub use payload::Payload;

/// Minimum protocol version supported by this implementation.
pub const PROTOCOL_MIN: i32 = 1;

/// Maximum protocol version supported by this implementation.
pub const PROTOCOL_MAX: i32 = 1;

/// Protocol version stamped on outbound envelopes.
pub const PROTOCOL_VERSION: i32 = 1;
