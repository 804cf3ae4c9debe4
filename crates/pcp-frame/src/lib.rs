//! PCP frame codec for narrow-band radio command/response links.
//!
//! Every frame is laid out as:
//! - the callsign, `len(callsign)` bytes, no length prefix and no terminator
//! - a 1-byte function ID
//! - optionally, a 1-byte data length followed by that many data bytes
//!
//! The callsign length is shared configuration, never carried on the wire.

pub mod callsign;
pub mod codec;
pub mod config;
pub mod cursor;
pub mod error;
pub mod function;
pub mod reader;
pub mod telemetry;
pub mod writer;

#[cfg(feature = "async")]
pub mod async_codec;

pub use callsign::Callsign;
pub use codec::{
    decode_frame, encode_default, encode_frame, encode_into, frame_length, frame_length_default,
    function_id, opt_data, opt_data_len, Frame, MAX_OPT_DATA_LEN,
};
pub use config::FrameConfig;
pub use error::{FrameError, Result};
pub use function::{classify, function_name, lookup, lookup_name, FunctionInfo, FunctionKind};
pub use reader::FrameReader;
pub use telemetry::PacketInfo;
pub use writer::FrameWriter;

#[cfg(feature = "async")]
pub use async_codec::PcpCodec;
