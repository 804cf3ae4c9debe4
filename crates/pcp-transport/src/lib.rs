//! Radio link abstraction for PCP frames.
//!
//! The frame codec never touches the air interface. It hands complete frames
//! to a [`RadioLink`] and receives complete frames back from one:
//! - [`UdpLink`] carries one frame per datagram, for bridging to an SDR or
//!   LoRa gateway process
//! - [`MemoryLink`] connects two in-process endpoints, for tests and demos
//!
//! This is the lowest layer of pcp. Everything else builds on top of
//! the [`RadioLink`] trait provided here.

pub mod error;
pub mod memory;
pub mod traits;
pub mod udp;

pub use error::{Result, TransportError};
pub use memory::MemoryLink;
pub use traits::{RadioLink, DEFAULT_MAX_FRAME_LEN};
pub use udp::UdpLink;
