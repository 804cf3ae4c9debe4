use bytes::BytesMut;
use pcp_transport::RadioLink;
use tracing::debug;

use crate::codec::{encode_frame, Frame};
use crate::config::FrameConfig;
use crate::error::{FrameError, Result};
use crate::function::function_name;

/// Encodes frames under the configured callsign and transmits them.
pub struct FrameWriter<L> {
    inner: L,
    buf: BytesMut,
    config: FrameConfig,
}

impl<L: RadioLink> FrameWriter<L> {
    /// Create a new frame writer.
    pub fn new(inner: L, config: FrameConfig) -> Self {
        let buf = BytesMut::with_capacity(config.max_frame_len);
        Self { inner, buf, config }
    }

    /// Transmit a decoded frame.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.send(frame.function_id, frame.opt_data.as_ref())
    }

    /// Encode and transmit one frame.
    pub fn send(&mut self, function_id: u8, opt_data: &[u8]) -> Result<()> {
        self.buf.clear();
        encode_frame(
            self.config.callsign.as_bytes(),
            function_id,
            opt_data,
            &mut self.buf,
        )?;

        self.inner.transmit(&self.buf).map_err(FrameError::from)?;
        debug!(
            function_id,
            function = function_name(function_id),
            len = self.buf.len(),
            "frame sent"
        );
        Ok(())
    }

    /// Encode and transmit a frame without optional data.
    pub fn send_default(&mut self, function_id: u8) -> Result<()> {
        self.send(function_id, &[])
    }

    /// Borrow the underlying link.
    pub fn get_ref(&self) -> &L {
        &self.inner
    }

    /// Mutably borrow the underlying link.
    pub fn get_mut(&mut self) -> &mut L {
        &mut self.inner
    }

    /// Consume the writer and return the inner link.
    pub fn into_inner(self) -> L {
        self.inner
    }

    /// Current frame writer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use pcp_transport::{MemoryLink, TransportError};

    use super::*;
    use crate::callsign::Callsign;
    use crate::codec::decode_frame;
    use crate::function::{CMD_GET_PACKET_INFO, CMD_PING, CMD_SET_RTC};

    fn config() -> FrameConfig {
        FrameConfig::new(Callsign::from_static("PLUTON-UPV").unwrap())
    }

    #[test]
    fn send_default_puts_bare_frame_on_link() {
        let (link, mut air) = MemoryLink::pair();
        let mut writer = FrameWriter::new(link, config());

        writer.send_default(CMD_PING).unwrap();

        let wire = air.receive(255).unwrap();
        assert_eq!(wire.as_ref(), b"PLUTON-UPV\x00");
    }

    #[test]
    fn send_with_data() {
        let (link, mut air) = MemoryLink::pair();
        let mut writer = FrameWriter::new(link, config());

        writer.send(CMD_SET_RTC, &[0x01, 0x02, 0x03]).unwrap();

        let wire = air.receive(255).unwrap();
        let frame = decode_frame(b"PLUTON-UPV", &wire).unwrap();
        assert_eq!(frame.function_id, CMD_SET_RTC);
        assert_eq!(frame.opt_data.as_ref(), &[0x01, 0x02, 0x03]);
    }

    #[test]
    fn consecutive_frames_do_not_bleed() {
        let (link, mut air) = MemoryLink::pair();
        let mut writer = FrameWriter::new(link, config());

        writer.send(CMD_SET_RTC, b"long payload").unwrap();
        writer.write_frame(&Frame::without_data(CMD_GET_PACKET_INFO)).unwrap();

        let _ = air.receive(255).unwrap();
        let second = air.receive(255).unwrap();
        assert_eq!(second.as_ref(), b"PLUTON-UPV\x04");
    }

    #[test]
    fn oversized_data_never_reaches_link() {
        let (link, mut air) = MemoryLink::pair();
        air.set_receive_timeout(Some(std::time::Duration::from_millis(10)))
            .unwrap();
        let mut writer = FrameWriter::new(link, config());

        let err = writer.send(CMD_SET_RTC, &[0u8; 300]).unwrap_err();
        assert!(matches!(err, FrameError::PayloadTooLarge { .. }));
        assert!(matches!(air.receive(255), Err(TransportError::Timeout(_))));
    }

    #[test]
    fn link_failure_surfaces() {
        let (link, air) = MemoryLink::pair();
        drop(air);
        let mut writer = FrameWriter::new(link, config());

        let err = writer.send_default(CMD_PING).unwrap_err();
        assert!(matches!(err, FrameError::Transport(TransportError::Closed)));
    }

    #[test]
    fn accessors_and_into_inner() {
        let (link, _air) = MemoryLink::pair();
        let mut writer = FrameWriter::new(link, config());

        assert_eq!(writer.config().callsign.as_bytes(), b"PLUTON-UPV");
        let _ = writer.get_ref();
        let _ = writer.get_mut();
        let _inner = writer.into_inner();
    }
}
