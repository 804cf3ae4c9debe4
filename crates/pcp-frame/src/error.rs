use pcp_transport::TransportError;

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The callsign is empty, or the frame does not start with it.
    #[error("invalid callsign")]
    CallsignInvalid,

    /// The frame is too short for the field being read, or a required
    /// output buffer is missing or too small.
    #[error("invalid frame")]
    FrameInvalid,

    /// Reserved for authenticated frames; never produced by the codec.
    #[error("incorrect password")]
    IncorrectPassword,

    /// The declared data length disagrees with the bytes present.
    #[error("optional data length mismatch (declared {declared}, available {available})")]
    LengthMismatch { declared: u8, available: usize },

    /// Reserved for integrity-checked frames; never produced by the codec.
    #[error("CRC mismatch")]
    CrcMismatch,

    /// The optional data does not fit the 1-byte length field.
    #[error("optional data too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The caller-provided frame buffer cannot hold the encoded frame.
    #[error("frame buffer too small ({capacity} bytes, need {needed})")]
    BufferTooSmall { needed: usize, capacity: usize },

    /// The radio link failed.
    #[error("link error: {0}")]
    Transport(#[from] TransportError),

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrameError {
    /// Signed status code used by the flight software for the same condition.
    ///
    /// Link and I/O failures have no status code.
    pub fn status_code(&self) -> Option<i16> {
        match self {
            FrameError::CallsignInvalid => Some(-1),
            FrameError::FrameInvalid
            | FrameError::PayloadTooLarge { .. }
            | FrameError::BufferTooSmall { .. } => Some(-2),
            FrameError::IncorrectPassword => Some(-3),
            FrameError::LengthMismatch { .. } => Some(-4),
            FrameError::CrcMismatch => Some(-7),
            FrameError::Transport(_) | FrameError::Io(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
