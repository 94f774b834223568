//! Relay Lane
//!
//! An echo worker for duplex relay channels: connect to a relay endpoint,
//! pull requests, echo their textual form back, and report per-request
//! failures through the channel's error path. The protocol types live in
//! `relay-protocol`, the loop and channel abstraction in `relay-worker`;
//! this crate adds layered configuration and the CLI entrypoint.

pub mod config;

pub use config::{ConfigError, LaneConfig, DEFAULT_ENDPOINT};
pub use relay_protocol::{Envelope, Frame, Payload, PayloadError, ProtocolError};
pub use relay_worker::{
    Echo, Handler, HandlerError, JsonLineRelay, Relay, RelayError, Worker, WorkerConfig,
    WorkerState,
};
