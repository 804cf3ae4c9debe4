use std::time::Duration;

use pcp_transport::DEFAULT_MAX_FRAME_LEN;

use crate::callsign::Callsign;

/// Configuration shared by [`FrameReader`](crate::FrameReader) and
/// [`FrameWriter`](crate::FrameWriter).
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Callsign that prefixes every frame on this link.
    pub callsign: Callsign,
    /// Largest frame read from the link. Default: 255 bytes.
    pub max_frame_len: usize,
    /// How long a read waits for a frame. Default: forever.
    pub receive_timeout: Option<Duration>,
}

impl FrameConfig {
    pub fn new(callsign: Callsign) -> Self {
        Self {
            callsign,
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
            receive_timeout: None,
        }
    }
}
