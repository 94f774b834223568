//! Configurable mock relay for tests.
//!
//! Scripts the inbound side of the channel, records every outbound write,
//! and injects failures into individual operations. Kept public so
//! downstream crates can drive a worker in-process.

use std::collections::VecDeque;
use std::io;

use relay_protocol::Payload;

use crate::relay::{Relay, RelayError};

/// A write recorded by the mock relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Written {
    /// Normal response text.
    Response(String),
    /// Error signal text.
    Error(String),
}

/// In-memory relay with scripted requests and failure injection.
///
/// `receive` yields the scripted payloads in order and reports
/// end-of-stream once the script runs out.
#[derive(Debug, Default)]
pub struct MockRelay {
    inbound: VecDeque<Payload>,
    written: Vec<Written>,
    fail_receive: Option<String>,
    fail_send: Option<String>,
    fail_error: Option<String>,
}

impl MockRelay {
    /// Create a mock relay with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next inbound payload.
    pub fn push(&mut self, payload: Payload) {
        self.inbound.push_back(payload);
    }

    /// Script a textual inbound payload.
    pub fn push_text(&mut self, text: &str) {
        self.push(Payload::from_text(text));
    }

    /// Fail the next `receive` with an I/O error.
    pub fn fail_next_receive(&mut self, message: &str) {
        self.fail_receive = Some(message.to_string());
    }

    /// Fail the next `send` with an I/O error.
    pub fn fail_next_send(&mut self, message: &str) {
        self.fail_send = Some(message.to_string());
    }

    /// Fail the next `error` with an I/O error.
    pub fn fail_next_error(&mut self, message: &str) {
        self.fail_error = Some(message.to_string());
    }

    /// Everything written through the relay, in write order.
    pub fn written(&self) -> &[Written] {
        &self.written
    }

    /// Only the normal responses, in write order.
    pub fn responses(&self) -> Vec<&str> {
        self.written
            .iter()
            .filter_map(|w| match w {
                Written::Response(text) => Some(text.as_str()),
                Written::Error(_) => None,
            })
            .collect()
    }

    /// Only the error signals, in write order.
    pub fn errors(&self) -> Vec<&str> {
        self.written
            .iter()
            .filter_map(|w| match w {
                Written::Error(text) => Some(text.as_str()),
                Written::Response(_) => None,
            })
            .collect()
    }

    fn injected(slot: &mut Option<String>) -> Option<RelayError> {
        slot.take()
            .map(|message| RelayError::Io(io::Error::new(io::ErrorKind::BrokenPipe, message)))
    }
}

impl Relay for MockRelay {
    fn receive(&mut self) -> Result<Option<Payload>, RelayError> {
        if let Some(err) = Self::injected(&mut self.fail_receive) {
            return Err(err);
        }
        Ok(self.inbound.pop_front())
    }

    fn send(&mut self, text: &str) -> Result<(), RelayError> {
        if let Some(err) = Self::injected(&mut self.fail_send) {
            return Err(err);
        }
        self.written.push(Written::Response(text.to_string()));
        Ok(())
    }

    fn error(&mut self, text: &str) -> Result<(), RelayError> {
        if let Some(err) = Self::injected(&mut self.fail_error) {
            return Err(err);
        }
        self.written.push(Written::Error(text.to_string()));
        Ok(())
    }
}
