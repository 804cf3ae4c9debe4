//! `tokio-util` codec for datagram transports such as `UdpFramed`.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::callsign::Callsign;
use crate::codec::{decode_frame, encode_frame, Frame};
use crate::error::FrameError;

/// Frame codec where the whole buffer handed to `decode` is one datagram.
#[derive(Debug, Clone)]
pub struct PcpCodec {
    callsign: Callsign,
}

impl PcpCodec {
    pub fn new(callsign: Callsign) -> Self {
        Self { callsign }
    }

    pub fn callsign(&self) -> &Callsign {
        &self.callsign
    }
}

impl Decoder for PcpCodec {
    type Item = Frame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>, FrameError> {
        if src.is_empty() {
            return Ok(None);
        }
        let datagram = src.split();
        decode_frame(self.callsign.as_bytes(), &datagram).map(Some)
    }
}

impl Encoder<Frame> for PcpCodec {
    type Error = FrameError;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<(), FrameError> {
        encode_frame(
            self.callsign.as_bytes(),
            item.function_id,
            item.opt_data.as_ref(),
            dst,
        )
    }
}
