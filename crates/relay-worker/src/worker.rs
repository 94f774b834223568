//! The worker loop.
//!
//! Bridges one inbound request to one outbound response or error signal,
//! indefinitely, until the channel signals end-of-stream. All request-level
//! failures are contained here; only a failure of the relay itself escapes.

use std::fmt;

use chrono::{DateTime, Utc};
use relay_protocol::Payload;
use tracing::{debug, warn};

use crate::handler::Handler;
use crate::relay::{Relay, RelayError};

/// Lifecycle states of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Created but not yet running.
    Inactive,
    /// Blocked on the next request.
    Ready,
    /// A request is in flight.
    Working,
    /// The channel signalled end-of-stream. Terminal.
    Stopped,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => write!(f, "inactive"),
            Self::Ready => write!(f, "ready"),
            Self::Working => write!(f, "working"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// A worker bound to one relay channel for its whole lifetime.
pub struct Worker<R, H> {
    relay: R,
    handler: H,
    state: WorkerState,
    num_execs: u64,
    created_at: DateTime<Utc>,
}

impl<R, H> Worker<R, H> {
    /// Bind a handler to a relay channel.
    pub fn new(relay: R, handler: H) -> Self {
        Self {
            relay,
            handler,
            state: WorkerState::Inactive,
            num_execs: 0,
            created_at: Utc::now(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Number of requests answered so far, error signals included.
    pub fn num_execs(&self) -> u64 {
        self.num_execs
    }

    /// When this worker was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Borrow the underlying relay.
    pub fn relay(&self) -> &R {
        &self.relay
    }

    /// Consume the worker and release its relay.
    pub fn into_relay(self) -> R {
        self.relay
    }
}

impl<R: Relay, H: Handler> Worker<R, H> {
    /// Serve requests until the channel signals end-of-stream.
    ///
    /// End-of-stream is either the transport reporting no further requests
    /// or a request with an empty body, the terminal request relays use to
    /// end a session. Neither produces a channel write. Every other request
    /// produces exactly one write: a response, or an error signal when the
    /// handler or the response write fails.
    pub fn run(&mut self) -> Result<(), RelayError> {
        self.state = WorkerState::Ready;
        loop {
            let payload = match self.relay.receive() {
                Ok(Some(payload)) => payload,
                Ok(None) => break,
                Err(e) => {
                    self.state = WorkerState::Stopped;
                    return Err(e);
                }
            };
            if payload.is_empty() {
                break;
            }

            self.state = WorkerState::Working;
            if let Err(e) = self.exec(&payload) {
                self.state = WorkerState::Stopped;
                return Err(e);
            }
            self.num_execs += 1;
            self.state = WorkerState::Ready;
        }
        self.state = WorkerState::Stopped;
        debug!(num_execs = self.num_execs, "end-of-stream, worker stopped");
        Ok(())
    }

    // One write per request. Handler failures and a failed response write
    // both turn into an error signal; if the error path fails too, the
    // relay is unusable and the failure escapes to `run`.
    fn exec(&mut self, payload: &Payload) -> Result<(), RelayError> {
        let text = match self.handler.handle(payload) {
            Ok(text) => text,
            Err(e) => {
                debug!(error = %e, "request failed, sending error signal");
                return self.relay.error(&e.to_string());
            }
        };
        if let Err(e) = self.relay.send(&text) {
            warn!(error = %e, "response write failed, sending error signal");
            return self.relay.error(&e.to_string());
        }
        Ok(())
    }
}

impl<R, H> fmt::Display for Worker<R, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "relay worker (state: {}, num_execs: {}, created: {})",
            self.state,
            self.num_execs,
            self.created_at.format("%Y-%m-%dT%H:%M:%SZ")
        )
    }
}
