//! Request handlers.
//!
//! A handler is the application-logic slot of the worker loop: it derives
//! one textual response per request. The shipped [`Echo`] handler returns
//! the textual form of the input unchanged; real deployments substitute
//! their own logic here.

use relay_protocol::{Payload, PayloadError};
use thiserror::Error;

/// Failure raised while deriving a response from a request.
///
/// Handler failures are contained per request: the worker converts them to
/// an error signal on the channel and keeps serving. The message becomes
/// the error signal text, so it must be a single line and self-contained.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The request payload has no textual form.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// Application-defined failure.
    #[error("{0}")]
    Failed(String),
}

impl HandlerError {
    /// Create an application-defined failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Derive one textual response per request.
pub trait Handler {
    fn handle(&mut self, payload: &Payload) -> Result<String, HandlerError>;
}

/// Echo transformation: the textual form of the input, unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Echo;

impl Handler for Echo {
    fn handle(&mut self, payload: &Payload) -> Result<String, HandlerError> {
        Ok(payload.text()?.to_owned())
    }
}

/// Adapt a closure into a [`Handler`].
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: FnMut(&Payload) -> Result<String, HandlerError>,
{
    HandlerFn(f)
}

/// [`Handler`] backed by a closure. Built with [`handler_fn`].
pub struct HandlerFn<F>(F);

impl<F> Handler for HandlerFn<F>
where
    F: FnMut(&Payload) -> Result<String, HandlerError>,
{
    fn handle(&mut self, payload: &Payload) -> Result<String, HandlerError> {
        (self.0)(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_returns_input_text() {
        let mut echo = Echo;
        let response = echo.handle(&Payload::from_text("hello")).unwrap();
        assert_eq!(response, "hello");
    }

    #[test]
    fn test_echo_rejects_non_text_input() {
        let mut echo = Echo;
        let err = echo.handle(&Payload::new(vec![0xff, 0xfe])).unwrap_err();
        assert!(matches!(err, HandlerError::Payload(_)));
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn test_closure_handler() {
        let mut upper = handler_fn(|payload: &Payload| {
            payload
                .text()
                .map(str::to_uppercase)
                .map_err(HandlerError::from)
        });
        assert_eq!(upper.handle(&Payload::from_text("abc")).unwrap(), "ABC");
    }
}
