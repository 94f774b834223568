//! Worker configuration.

use relay_protocol::{PROTOCOL_MAX, PROTOCOL_MIN};

/// Default cap on a single encoded frame (10 MB).
pub const DEFAULT_MAX_FRAME_BYTES: usize = 10 * 1024 * 1024;

/// Worker configuration settings.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Minimum accepted envelope version.
    pub protocol_min: i32,
    /// Maximum accepted envelope version.
    pub protocol_max: i32,
    /// Maximum size of a single encoded frame in bytes.
    pub max_frame_bytes: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            protocol_min: PROTOCOL_MIN,
            protocol_max: PROTOCOL_MAX,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }
}
