use bytes::{BufMut, Bytes, BytesMut};

use crate::cursor::FrameCursor;
use crate::error::{FrameError, Result};
use crate::function::{classify, FunctionKind};

/// Largest optional data block the 1-byte length field can describe.
pub const MAX_OPT_DATA_LEN: usize = u8::MAX as usize;

/// A decoded frame: what remains once the callsign has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The command or response identifier.
    pub function_id: u8,
    /// The optional data block; empty when the frame carried none.
    pub opt_data: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(function_id: u8, opt_data: impl Into<Bytes>) -> Self {
        Self {
            function_id,
            opt_data: opt_data.into(),
        }
    }

    /// Create a frame with no optional data.
    pub fn without_data(function_id: u8) -> Self {
        Self::new(function_id, Bytes::new())
    }

    /// Registry classification of the function ID.
    pub fn kind(&self) -> FunctionKind {
        classify(self.function_id)
    }

    /// The total wire size of this frame under `callsign`.
    pub fn wire_size(&self, callsign: &[u8]) -> usize {
        let data = if self.opt_data.is_empty() {
            0
        } else {
            1 + self.opt_data.len()
        };
        callsign.len() + 1 + data
    }
}

fn check_callsign(callsign: &[u8]) -> Result<()> {
    if callsign.is_empty() {
        return Err(FrameError::CallsignInvalid);
    }
    Ok(())
}

fn data_len_field(opt_data: &[u8]) -> Result<u8> {
    u8::try_from(opt_data.len()).map_err(|_| FrameError::PayloadTooLarge {
        size: opt_data.len(),
        max: MAX_OPT_DATA_LEN,
    })
}

/// Number of bytes a frame with `opt_data_len` bytes of optional data occupies.
///
/// This is the buffer size [`encode_into`] needs.
pub fn frame_length(callsign: &[u8], opt_data_len: u8) -> Result<usize> {
    check_callsign(callsign)?;

    // callsign and function ID are always present
    let mut len = callsign.len() + 1;
    if opt_data_len > 0 {
        len += 1 + usize::from(opt_data_len);
    }
    Ok(len)
}

/// Length of a frame without optional data.
pub fn frame_length_default(callsign: &[u8]) -> Result<usize> {
    frame_length(callsign, 0)
}

/// Encode a frame into a caller-provided buffer.
///
/// Returns the number of bytes written, which equals
/// [`frame_length`]. Fails with [`FrameError::BufferTooSmall`] instead of
/// writing past `dst`. Any function ID is accepted.
///
/// Wire format:
/// ```text
/// ┌──────────────────┬──────────┬────────────┬──────────────────┐
/// │ Callsign         │ Function │ Data len   │ Data             │
/// │ (len(callsign))  │ ID (1B)  │ (1B, opt.) │ (Data len bytes) │
/// └──────────────────┴──────────┴────────────┴──────────────────┘
/// ```
/// The last two fields are present only when `opt_data` is non-empty.
pub fn encode_into(
    dst: &mut [u8],
    callsign: &[u8],
    function_id: u8,
    opt_data: &[u8],
) -> Result<usize> {
    let data_len = data_len_field(opt_data)?;
    let needed = frame_length(callsign, data_len)?;
    if dst.len() < needed {
        return Err(FrameError::BufferTooSmall {
            needed,
            capacity: dst.len(),
        });
    }

    let mut out = &mut dst[..needed];
    out.put_slice(callsign);
    out.put_u8(function_id);
    if data_len > 0 {
        out.put_u8(data_len);
        out.put_slice(opt_data);
    }
    Ok(needed)
}

/// Encode a frame, appending it to `dst`.
pub fn encode_frame(
    callsign: &[u8],
    function_id: u8,
    opt_data: &[u8],
    dst: &mut BytesMut,
) -> Result<()> {
    let data_len = data_len_field(opt_data)?;
    let needed = frame_length(callsign, data_len)?;

    dst.reserve(needed);
    dst.put_slice(callsign);
    dst.put_u8(function_id);
    if data_len > 0 {
        dst.put_u8(data_len);
        dst.put_slice(opt_data);
    }
    Ok(())
}

/// Encode a frame without optional data, appending it to `dst`.
pub fn encode_default(callsign: &[u8], function_id: u8, dst: &mut BytesMut) -> Result<()> {
    encode_frame(callsign, function_id, &[], dst)
}

/// Read the function ID that follows the callsign.
///
/// The callsign bytes themselves are not compared.
pub fn function_id(callsign: &[u8], frame: &[u8]) -> Result<u8> {
    check_callsign(callsign)?;

    let mut cur = FrameCursor::new(frame);
    cur.skip(callsign.len())?;
    cur.read_u8()
}

/// Read and cross-check the optional data length.
///
/// Returns 0 for a frame that ends right after the function ID. Otherwise the
/// declared length must equal the number of bytes that follow it, or
/// [`FrameError::LengthMismatch`] is returned.
pub fn opt_data_len(callsign: &[u8], frame: &[u8]) -> Result<u8> {
    check_callsign(callsign)?;

    let mut cur = FrameCursor::new(frame);
    cur.skip(callsign.len())?;
    cur.skip(1)?;
    if cur.is_empty() {
        return Ok(0);
    }

    let declared = cur.read_u8()?;
    let available = cur.remaining();
    if usize::from(declared) != available {
        return Err(FrameError::LengthMismatch {
            declared,
            available,
        });
    }
    Ok(declared)
}

/// Copy the optional data into `out`.
///
/// The frame must start with `callsign`; anything else is
/// [`FrameError::CallsignInvalid`]. Returns the number of bytes copied, 0 when
/// the frame carries no optional data. `out` must hold at least the declared
/// length.
pub fn opt_data(callsign: &[u8], frame: &[u8], out: &mut [u8]) -> Result<usize> {
    check_callsign(callsign)?;

    let mut cur = FrameCursor::new(frame);
    if cur.read_slice(callsign.len())? != callsign {
        return Err(FrameError::CallsignInvalid);
    }
    cur.skip(1)?;
    if cur.is_empty() {
        return Ok(0);
    }

    let declared = usize::from(cur.read_u8()?);
    let data = cur.read_slice(declared)?;
    let dst = out.get_mut(..declared).ok_or(FrameError::FrameInvalid)?;
    dst.copy_from_slice(data);
    Ok(declared)
}

/// Fully validate a received frame and split it into its fields.
///
/// Applies the callsign check, the length cross-check and copies the
/// optional data out of `frame`.
pub fn decode_frame(callsign: &[u8], frame: &[u8]) -> Result<Frame> {
    check_callsign(callsign)?;

    let mut cur = FrameCursor::new(frame);
    if cur.read_slice(callsign.len())? != callsign {
        return Err(FrameError::CallsignInvalid);
    }
    let function_id = cur.read_u8()?;
    if cur.is_empty() {
        return Ok(Frame::without_data(function_id));
    }

    let declared = cur.read_u8()?;
    let available = cur.remaining();
    if usize::from(declared) != available {
        return Err(FrameError::LengthMismatch {
            declared,
            available,
        });
    }
    let data = cur.read_slice(available)?;

    Ok(Frame::new(function_id, Bytes::copy_from_slice(data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::{CMD_PING, RESP_ACKNOWLEDGE, RESP_STATISTICS};

    const CS: &[u8] = b"AB";

    fn encode(function_id: u8, opt_data: &[u8]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        encode_frame(CS, function_id, opt_data, &mut buf).unwrap();
        buf.to_vec()
    }

    #[test]
    fn ping_without_data() {
        let frame = encode(0x00, b"");

        assert_eq!(frame, vec![0x41, 0x42, 0x00]);
        assert_eq!(function_id(CS, &frame).unwrap(), 0x00);
        assert_eq!(opt_data_len(CS, &frame).unwrap(), 0);

        let mut out = [0xEEu8; 4];
        assert_eq!(opt_data(CS, &frame, &mut out).unwrap(), 0);
    }

    #[test]
    fn response_with_data() {
        let frame = encode(0x25, &[0x10, 0x20]);

        assert_eq!(frame, vec![0x41, 0x42, 0x25, 0x02, 0x10, 0x20]);
        assert_eq!(function_id(CS, &frame).unwrap(), 0x25);
        assert_eq!(opt_data_len(CS, &frame).unwrap(), 2);

        let mut out = [0u8; 2];
        assert_eq!(opt_data(CS, &frame, &mut out).unwrap(), 2);
        assert_eq!(out, [0x10, 0x20]);
    }

    #[test]
    fn encode_decode_roundtrip() {
        let callsign = b"PLUTON-UPV";
        let max_data: Vec<u8> = (0..=254u8).collect();

        for data in [&b""[..], &b"x"[..], &max_data[..]] {
            let mut buf = BytesMut::new();
            encode_frame(callsign, RESP_STATISTICS, data, &mut buf).unwrap();

            let frame = decode_frame(callsign, &buf).unwrap();
            assert_eq!(frame.function_id, RESP_STATISTICS);
            assert_eq!(frame.opt_data.as_ref(), data);
            assert_eq!(frame.wire_size(callsign), buf.len());
        }
    }

    #[test]
    fn frame_length_matches_encoded_size() {
        for len in [0u8, 1, 2, 17, 255] {
            let data = vec![0x5A; usize::from(len)];
            assert_eq!(frame_length(CS, len).unwrap(), encode(0x01, &data).len());
        }
        assert_eq!(frame_length_default(CS).unwrap(), CS.len() + 1);
        assert_eq!(frame_length(CS, 2).unwrap(), CS.len() + 4);
    }

    #[test]
    fn empty_callsign_rejected_everywhere() {
        let frame = [0x00u8];
        let mut out = [0u8; 8];

        assert!(matches!(frame_length(b"", 0), Err(FrameError::CallsignInvalid)));
        assert!(matches!(function_id(b"", &frame), Err(FrameError::CallsignInvalid)));
        assert!(matches!(opt_data_len(b"", &frame), Err(FrameError::CallsignInvalid)));
        assert!(matches!(opt_data(b"", &frame, &mut out), Err(FrameError::CallsignInvalid)));
        assert!(matches!(decode_frame(b"", &frame), Err(FrameError::CallsignInvalid)));
        assert!(matches!(
            encode_into(&mut out, b"", CMD_PING, &[]),
            Err(FrameError::CallsignInvalid)
        ));
    }

    #[test]
    fn encode_default_writes_bare_frame() {
        let mut buf = BytesMut::from(&b"prefix"[..]);
        encode_default(CS, CMD_PING, &mut buf).unwrap();
        assert_eq!(&buf[..], b"prefixAB\x00");

        let mut buf = BytesMut::new();
        encode_default(CS, 0x00, &mut buf).unwrap();
        assert_eq!(buf.as_ref(), &[0x41, 0x42, 0x00]);
        assert_eq!(buf.len(), frame_length_default(CS).unwrap());
    }

    #[test]
    fn encode_into_exact_buffer() {
        let mut buf = [0u8; 6];
        let written = encode_into(&mut buf, CS, 0x25, &[0x10, 0x20]).unwrap();
        assert_eq!(written, 6);
        assert_eq!(buf, [0x41, 0x42, 0x25, 0x02, 0x10, 0x20]);
    }

    #[test]
    fn encode_into_leaves_tail_untouched() {
        let mut buf = [0xEEu8; 5];
        let written = encode_into(&mut buf, CS, RESP_ACKNOWLEDGE, &[]).unwrap();
        assert_eq!(written, 3);
        assert_eq!(buf, [0x41, 0x42, 0x3F, 0xEE, 0xEE]);
    }

    #[test]
    fn encode_into_refuses_short_buffer() {
        let mut buf = [0u8; 5];
        let err = encode_into(&mut buf, CS, 0x25, &[0x10, 0x20]).unwrap_err();
        assert!(matches!(
            err,
            FrameError::BufferTooSmall {
                needed: 6,
                capacity: 5
            }
        ));
    }

    #[test]
    fn oversized_data_rejected() {
        let data = vec![0u8; MAX_OPT_DATA_LEN + 1];
        let mut buf = BytesMut::new();
        let err = encode_frame(CS, 0x01, &data, &mut buf).unwrap_err();
        assert!(matches!(err, FrameError::PayloadTooLarge { size: 256, max: 255 }));
        assert!(buf.is_empty());
    }

    #[test]
    fn any_function_id_encodes() {
        let frame = encode(0xFF, b"");
        assert_eq!(function_id(CS, &frame).unwrap(), 0xFF);
    }

    #[test]
    fn truncated_frames_are_invalid() {
        let mut out = [0u8; 8];

        assert!(matches!(function_id(CS, b"AB"), Err(FrameError::FrameInvalid)));
        assert!(matches!(opt_data_len(CS, b"A"), Err(FrameError::FrameInvalid)));
        assert!(matches!(opt_data(CS, b"AB", &mut out), Err(FrameError::FrameInvalid)));
        assert!(matches!(opt_data(CS, b"A", &mut out), Err(FrameError::FrameInvalid)));
        assert!(matches!(decode_frame(CS, b"AB"), Err(FrameError::FrameInvalid)));
    }

    #[test]
    fn declared_length_mismatch_detected() {
        // declares 3 bytes, carries 2
        let short = [0x41, 0x42, 0x25, 0x03, 0x10, 0x20];
        assert!(matches!(
            opt_data_len(CS, &short),
            Err(FrameError::LengthMismatch {
                declared: 3,
                available: 2
            })
        ));
        assert!(matches!(
            decode_frame(CS, &short),
            Err(FrameError::LengthMismatch { .. })
        ));

        // declares 1 byte, carries 2
        let long = [0x41, 0x42, 0x25, 0x01, 0x10, 0x20];
        assert!(matches!(
            opt_data_len(CS, &long),
            Err(FrameError::LengthMismatch {
                declared: 1,
                available: 2
            })
        ));
    }

    #[test]
    fn opt_data_fails_closed_on_overrun() {
        let short = [0x41, 0x42, 0x25, 0x03, 0x10, 0x20];
        let mut out = [0u8; 8];
        assert!(matches!(
            opt_data(CS, &short, &mut out),
            Err(FrameError::FrameInvalid)
        ));
    }

    #[test]
    fn opt_data_requires_room_in_output() {
        let frame = encode(0x25, &[0x10, 0x20, 0x30]);
        let mut small = [0u8; 2];
        assert!(matches!(
            opt_data(CS, &frame, &mut small),
            Err(FrameError::FrameInvalid)
        ));
        assert!(matches!(
            opt_data(CS, &frame, &mut []),
            Err(FrameError::FrameInvalid)
        ));
    }

    #[test]
    fn foreign_callsign_rejected() {
        let frame = encode(0x25, &[0x10, 0x20]);
        let mut out = [0u8; 8];

        assert!(matches!(
            opt_data(b"XY", &frame, &mut out),
            Err(FrameError::CallsignInvalid)
        ));
        assert!(matches!(
            decode_frame(b"XY", &frame),
            Err(FrameError::CallsignInvalid)
        ));
        // the unchecked extractors only rely on the callsign length
        assert_eq!(function_id(b"XY", &frame).unwrap(), 0x25);
    }

    #[test]
    fn extraction_is_repeatable() {
        let frame = encode(0x25, &[0x10, 0x20]);
        let before = frame.clone();

        let first = decode_frame(CS, &frame).unwrap();
        let second = decode_frame(CS, &frame).unwrap();
        assert_eq!(first, second);
        assert_eq!(frame, before);
    }

    #[test]
    fn frame_kind_uses_registry() {
        assert_eq!(Frame::without_data(CMD_PING).kind(), FunctionKind::PublicCommand);
        assert_eq!(Frame::without_data(RESP_ACKNOWLEDGE).kind(), FunctionKind::Acknowledge);
    }
}
