//! JSON-lines reference codec.
//!
//! One JSON [`Envelope`] per line, flushed per write. This is the codec the
//! `relay-lane` binary speaks; it is one pluggable [`Relay`] implementation,
//! not the protocol's identity. Transports with their own framing implement
//! [`Relay`] directly.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};

use relay_protocol::{Envelope, Payload, ProtocolError};
use tracing::trace;

use crate::config::WorkerConfig;
use crate::relay::{Relay, RelayError};

/// Newline-delimited JSON relay over any reader/writer pair.
pub struct JsonLineRelay<R, W> {
    reader: R,
    writer: W,
    protocol_min: i32,
    protocol_max: i32,
    max_frame_bytes: usize,
}

impl<R: BufRead, W: Write> JsonLineRelay<R, W> {
    /// Create a relay with the default worker configuration.
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_config(reader, writer, &WorkerConfig::default())
    }

    /// Create a relay with explicit version bounds and frame size cap.
    pub fn with_config(reader: R, writer: W, config: &WorkerConfig) -> Self {
        Self {
            reader,
            writer,
            protocol_min: config.protocol_min,
            protocol_max: config.protocol_max,
            max_frame_bytes: config.max_frame_bytes,
        }
    }

    /// Borrow the underlying writer, e.g. to inspect captured output.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn write_envelope(&mut self, envelope: &Envelope) -> Result<(), RelayError> {
        let json = serde_json::to_string(envelope)
            .map_err(|e| ProtocolError::invalid_frame(e.to_string()))?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl JsonLineRelay<BufReader<TcpStream>, TcpStream> {
    /// Connect to a relay endpoint such as `localhost:9999`.
    pub fn connect(addr: impl ToSocketAddrs, config: &WorkerConfig) -> io::Result<Self> {
        let stream = TcpStream::connect(addr)?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self::with_config(reader, stream, config))
    }
}

impl JsonLineRelay<io::StdinLock<'static>, io::StdoutLock<'static>> {
    /// Serve the relay session over stdin/stdout.
    pub fn stdio(config: &WorkerConfig) -> Self {
        Self::with_config(io::stdin().lock(), io::stdout().lock(), config)
    }
}

impl<R: BufRead, W: Write> Relay for JsonLineRelay<R, W> {
    fn receive(&mut self) -> Result<Option<Payload>, RelayError> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line)?;
        if n == 0 {
            return Ok(None); // EOF
        }
        if n > self.max_frame_bytes {
            return Err(ProtocolError::FrameTooLarge {
                size: n,
                max: self.max_frame_bytes,
            }
            .into());
        }

        let envelope: Envelope = serde_json::from_str(line.trim_end())
            .map_err(|e| ProtocolError::invalid_frame(format!("invalid JSON: {}", e)))?;
        if envelope.v < self.protocol_min || envelope.v > self.protocol_max {
            return Err(ProtocolError::UnsupportedVersion {
                requested: envelope.v,
                min: self.protocol_min,
                max: self.protocol_max,
            }
            .into());
        }

        let payload = envelope.into_payload()?;
        trace!(bytes = payload.body.len(), "request frame received");
        Ok(Some(payload))
    }

    fn send(&mut self, text: &str) -> Result<(), RelayError> {
        self.write_envelope(&Envelope::response(text))
    }

    fn error(&mut self, text: &str) -> Result<(), RelayError> {
        self.write_envelope(&Envelope::error(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_protocol::Frame;
    use std::io::Cursor;

    fn request_line(text: &str) -> String {
        let envelope = Envelope::request(&Payload::from_text(text));
        format!("{}\n", serde_json::to_string(&envelope).unwrap())
    }

    #[test]
    fn test_receive_decodes_request_frame() {
        let input = request_line("hello");
        let mut relay = JsonLineRelay::new(Cursor::new(input), Vec::new());

        let payload = relay.receive().unwrap().unwrap();
        assert_eq!(payload.text().unwrap(), "hello");
        assert!(relay.receive().unwrap().is_none());
    }

    #[test]
    fn test_send_and_error_write_one_line_each() {
        let mut relay = JsonLineRelay::new(Cursor::new(String::new()), Vec::new());
        relay.send("ok").unwrap();
        relay.error("bad").unwrap();

        let out = String::from_utf8(relay.writer).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Envelope = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(
            first.frame,
            Frame::Response {
                text: "ok".to_string()
            }
        );
        let second: Envelope = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(
            second.frame,
            Frame::Error {
                text: "bad".to_string()
            }
        );
    }

    #[test]
    fn test_receive_rejects_invalid_json() {
        let mut relay = JsonLineRelay::new(Cursor::new("not json\n"), Vec::new());
        let err = relay.receive().unwrap_err();
        assert!(matches!(
            err,
            RelayError::Protocol(ProtocolError::InvalidFrame(_))
        ));
    }

    #[test]
    fn test_receive_rejects_unsupported_version() {
        let line = r#"{"v":99,"kind":"request","body":""}"#;
        let mut relay = JsonLineRelay::new(Cursor::new(format!("{}\n", line)), Vec::new());
        let err = relay.receive().unwrap_err();
        assert!(matches!(
            err,
            RelayError::Protocol(ProtocolError::UnsupportedVersion { requested: 99, .. })
        ));
    }

    #[test]
    fn test_receive_rejects_outbound_frame_kind() {
        let line = r#"{"v":1,"kind":"response","text":"nope"}"#;
        let mut relay = JsonLineRelay::new(Cursor::new(format!("{}\n", line)), Vec::new());
        let err = relay.receive().unwrap_err();
        assert!(matches!(
            err,
            RelayError::Protocol(ProtocolError::UnexpectedFrame { kind: "response" })
        ));
    }

    #[test]
    fn test_receive_enforces_frame_size_cap() {
        let config = WorkerConfig {
            max_frame_bytes: 16,
            ..WorkerConfig::default()
        };
        let input = request_line(&"x".repeat(64));
        let mut relay = JsonLineRelay::with_config(Cursor::new(input), Vec::new(), &config);
        let err = relay.receive().unwrap_err();
        assert!(matches!(
            err,
            RelayError::Protocol(ProtocolError::FrameTooLarge { max: 16, .. })
        ));
    }
}
