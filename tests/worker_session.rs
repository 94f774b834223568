//! End-to-end worker sessions over the JSON-lines codec.
//!
//! Each test scripts a full inbound stream, runs the worker against it, and
//! checks the outbound frames line by line.

use std::io::Cursor;

use relay_lane::{Echo, Envelope, Frame, JsonLineRelay, Payload, Worker, WorkerState};

fn request_line(payload: &Payload) -> String {
    format!("{}\n", serde_json::to_string(&Envelope::request(payload)).unwrap())
}

fn run_session(input: String) -> (Vec<Frame>, u64) {
    let relay = JsonLineRelay::new(Cursor::new(input), Vec::new());
    let mut worker = Worker::new(relay, Echo);
    worker.run().expect("session should end cleanly");

    let num_execs = worker.num_execs();
    // JsonLineRelay writes into the Vec<u8> it was given; replay it
    let frames = parse_frames(worker.relay().writer());
    (frames, num_execs)
}

fn parse_frames(bytes: &[u8]) -> Vec<Frame> {
    String::from_utf8(bytes.to_vec())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str::<Envelope>(line).unwrap().frame)
        .collect()
}

#[test]
fn test_hello_is_echoed() {
    let (frames, num_execs) = run_session(request_line(&Payload::from_text("hello")));

    assert_eq!(
        frames,
        vec![Frame::Response {
            text: "hello".to_string()
        }]
    );
    assert_eq!(num_execs, 1);
}

#[test]
fn test_non_text_request_yields_error_signal_then_session_continues() {
    let mut input = request_line(&Payload::new(vec![0xff, 0xfe]));
    input.push_str(&request_line(&Payload::from_text("still alive")));

    let (frames, num_execs) = run_session(input);

    assert_eq!(frames.len(), 2);
    match &frames[0] {
        Frame::Error { text } => assert!(text.contains("not valid UTF-8")),
        other => panic!("expected error frame, got {:?}", other),
    }
    assert_eq!(
        frames[1],
        Frame::Response {
            text: "still alive".to_string()
        }
    );
    assert_eq!(num_execs, 2);
}

#[test]
fn test_one_outbound_frame_per_request() {
    let mut input = String::new();
    for i in 0..4 {
        input.push_str(&request_line(&Payload::from_text(&format!("r{}", i))));
    }

    let (frames, num_execs) = run_session(input);
    assert_eq!(frames.len(), 4);
    assert_eq!(num_execs, 4);
}

#[test]
fn test_immediate_end_of_stream_writes_nothing() {
    let (frames, num_execs) = run_session(String::new());
    assert!(frames.is_empty());
    assert_eq!(num_execs, 0);
}

#[test]
fn test_empty_payload_ends_the_session_without_a_write() {
    let mut input = request_line(&Payload::from_text("first"));
    input.push_str(&request_line(&Payload::new(Vec::new())));
    input.push_str(&request_line(&Payload::from_text("after terminal")));

    let (frames, num_execs) = run_session(input);

    assert_eq!(
        frames,
        vec![Frame::Response {
            text: "first".to_string()
        }]
    );
    assert_eq!(num_execs, 1);
}

#[test]
fn test_context_does_not_change_the_echo() {
    let payload = Payload::with_context(b"hello".to_vec(), b"opaque metadata".to_vec());
    let (frames, _) = run_session(request_line(&payload));

    assert_eq!(
        frames,
        vec![Frame::Response {
            text: "hello".to_string()
        }]
    );
}

#[test]
fn test_malformed_frame_is_a_relay_failure_not_an_error_signal() {
    let relay = JsonLineRelay::new(Cursor::new("garbage\n".to_string()), Vec::new());
    let mut worker = Worker::new(relay, Echo);

    assert!(worker.run().is_err());
    assert_eq!(worker.state(), WorkerState::Stopped);
    assert!(worker.relay().writer().is_empty());
}
