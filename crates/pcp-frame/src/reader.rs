use pcp_transport::RadioLink;
use tracing::{debug, warn};

use crate::codec::{decode_frame, Frame};
use crate::config::FrameConfig;
use crate::error::{FrameError, Result};
use crate::function::function_name;

/// Receives frames from a link and decodes them under the configured callsign.
pub struct FrameReader<L> {
    inner: L,
    config: FrameConfig,
}

impl<L: RadioLink> FrameReader<L> {
    /// Create a frame reader and apply the configured receive timeout.
    pub fn new(mut inner: L, config: FrameConfig) -> Result<Self> {
        inner.set_receive_timeout(config.receive_timeout)?;
        Ok(Self { inner, config })
    }

    /// Receive and decode the next frame (blocking).
    ///
    /// A frame that fails validation is reported as an error; the next call
    /// reads the frame after it.
    pub fn read_frame(&mut self) -> Result<Frame> {
        let wire = self
            .inner
            .receive(self.config.max_frame_len)
            .map_err(FrameError::from)?;

        match decode_frame(self.config.callsign.as_bytes(), &wire) {
            Ok(frame) => {
                debug!(
                    function_id = frame.function_id,
                    function = function_name(frame.function_id),
                    len = wire.len(),
                    "frame received"
                );
                Ok(frame)
            }
            Err(err) => {
                warn!(len = wire.len(), error = %err, "dropping invalid frame");
                Err(err)
            }
        }
    }

    /// Borrow the underlying link.
    pub fn get_ref(&self) -> &L {
        &self.inner
    }

    /// Mutably borrow the underlying link.
    pub fn get_mut(&mut self) -> &mut L {
        &mut self.inner
    }

    /// Consume the reader and return the inner link.
    pub fn into_inner(self) -> L {
        self.inner
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pcp_transport::{MemoryLink, TransportError};

    use super::*;
    use crate::callsign::Callsign;
    use crate::function::{RESP_ACKNOWLEDGE, RESP_PACKET_INFO, RESP_PONG};
    use crate::writer::FrameWriter;

    fn config() -> FrameConfig {
        FrameConfig::new(Callsign::from_static("PLUTON-UPV").unwrap())
    }

    #[test]
    fn read_single_frame() {
        let (mut air, link) = MemoryLink::pair();
        let mut reader = FrameReader::new(link, config()).unwrap();

        air.transmit(b"PLUTON-UPV\x20").unwrap();
        let frame = reader.read_frame().unwrap();

        assert_eq!(frame.function_id, RESP_PONG);
        assert!(frame.opt_data.is_empty());
    }

    #[test]
    fn writer_to_reader_roundtrip() {
        let (tx, rx) = MemoryLink::pair();
        let mut writer = FrameWriter::new(tx, config());
        let mut reader = FrameReader::new(rx, config()).unwrap();

        writer.send(RESP_PACKET_INFO, &[0x28, 0xB4, 1, 0, 2, 0, 3, 0, 4, 0]).unwrap();
        writer.send_default(RESP_ACKNOWLEDGE).unwrap();

        let f1 = reader.read_frame().unwrap();
        let f2 = reader.read_frame().unwrap();
        assert_eq!(f1.function_id, RESP_PACKET_INFO);
        assert_eq!(f1.opt_data.len(), 10);
        assert_eq!(f2.function_id, RESP_ACKNOWLEDGE);
    }

    #[test]
    fn foreign_callsign_rejected_then_next_frame_read() {
        let (mut air, link) = MemoryLink::pair();
        let mut reader = FrameReader::new(link, config()).unwrap();

        air.transmit(b"OTHER-SAT1\x20").unwrap();
        air.transmit(b"PLUTON-UPV\x3F").unwrap();

        assert!(matches!(reader.read_frame(), Err(FrameError::CallsignInvalid)));
        assert_eq!(reader.read_frame().unwrap().function_id, RESP_ACKNOWLEDGE);
    }

    #[test]
    fn corrupt_length_rejected() {
        let (mut air, link) = MemoryLink::pair();
        let mut reader = FrameReader::new(link, config()).unwrap();

        air.transmit(b"PLUTON-UPV\x24\x05ab").unwrap();
        assert!(matches!(
            reader.read_frame(),
            Err(FrameError::LengthMismatch {
                declared: 5,
                available: 2
            })
        ));
    }

    #[test]
    fn applies_receive_timeout() {
        let (_air, link) = MemoryLink::pair();
        let cfg = FrameConfig {
            receive_timeout: Some(Duration::from_millis(10)),
            ..config()
        };
        let mut reader = FrameReader::new(link, cfg).unwrap();

        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::Transport(TransportError::Timeout(_))));
    }

    #[test]
    fn oversized_frame_truncated_by_link() {
        let (mut air, link) = MemoryLink::pair();
        let cfg = FrameConfig {
            max_frame_len: 13,
            ..config()
        };
        let mut reader = FrameReader::new(link, cfg).unwrap();

        // 10 + 1 + 1 + 3 bytes, truncated to 13
        air.transmit(b"PLUTON-UPV\x24\x03abc").unwrap();
        assert!(matches!(
            reader.read_frame(),
            Err(FrameError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn accessors_and_into_inner() {
        let (_air, link) = MemoryLink::pair();
        let mut reader = FrameReader::new(link, config()).unwrap();

        assert_eq!(reader.config().max_frame_len, 255);
        let _ = reader.get_ref();
        let _ = reader.get_mut();
        let _inner = reader.into_inner();
    }
}
