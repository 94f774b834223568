//! Relay Worker
//!
//! The worker side of a request/response protocol over a duplex relay
//! channel: pull one request, derive one textual response, write it back,
//! and convert any per-request failure into an error signal instead of a
//! response. One bad request never kills the worker.
//!
//! This crate can be used in two modes:
//! - **Over a real channel**: wrap a connected stream in the JSON-lines
//!   codec (or any other [`Relay`] implementation) and call [`Worker::run`]
//! - **In-process**: drive a worker against the [`mock::MockRelay`] for
//!   unit and integration testing

pub mod codec;
pub mod config;
pub mod handler;
pub mod mock;
pub mod relay;
pub mod worker;

pub use codec::JsonLineRelay;
pub use config::{WorkerConfig, DEFAULT_MAX_FRAME_BYTES};
pub use handler::{handler_fn, Echo, Handler, HandlerError, HandlerFn};
pub use relay::{Relay, RelayError};
pub use worker::{Worker, WorkerState};
