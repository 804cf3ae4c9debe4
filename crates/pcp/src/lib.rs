//! PCP: a compact command/response frame protocol for narrow-band radio links.
//!
//! A frame is `callsign | function ID | [data length | data]`, small enough for
//! a single LoRa packet. Both ends share the callsign out-of-band.
//!
//! # Crate Structure
//!
//! - [`transport`]: radio link abstraction (UDP bridge, in-memory pair)
//! - [`frame`]: frame codec, function ID registry, link reader/writer
//!
//! ```
//! use bytes::BytesMut;
//! # fn main() -> pcp::frame::Result<()> {
//! use pcp::frame::{decode_frame, encode_frame, function};
//!
//! let mut wire = BytesMut::new();
//! encode_frame(b"AB", function::RESP_STATISTICS, &[0x10, 0x20], &mut wire)?;
//! assert_eq!(wire.as_ref(), &[0x41, 0x42, 0x25, 0x02, 0x10, 0x20]);
//!
//! let frame = decode_frame(b"AB", &wire)?;
//! assert_eq!(frame.function_id, function::RESP_STATISTICS);
//! # Ok(())
//! # }
//! ```

/// Re-export transport types.
pub mod transport {
    pub use pcp_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use pcp_frame::*;
}
