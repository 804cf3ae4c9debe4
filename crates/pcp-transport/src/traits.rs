use std::time::Duration;

use bytes::Bytes;

use crate::error::Result;

/// Largest frame a single LoRa FIFO read can return.
pub const DEFAULT_MAX_FRAME_LEN: usize = 255;

/// A half-duplex, frame-oriented radio channel.
///
/// Every `transmit` puts exactly one frame on the air and every `receive`
/// returns exactly one frame, so the codec always sees a complete, stable
/// buffer. How the bytes get there (SPI modem, SDR, UDP bridge) is up to the
/// implementation.
pub trait RadioLink {
    /// Transmit one frame. Returns once the frame has been handed off.
    fn transmit(&mut self, frame: &[u8]) -> Result<()>;

    /// Receive one frame, truncated to at most `max_len` bytes.
    ///
    /// Waits up to the configured receive timeout and returns
    /// [`TransportError::Timeout`](crate::TransportError::Timeout) if nothing arrives.
    fn receive(&mut self, max_len: usize) -> Result<Bytes>;

    /// Set the receive timeout. `None` waits indefinitely.
    fn set_receive_timeout(&mut self, timeout: Option<Duration>) -> Result<()>;
}

impl<L: RadioLink + ?Sized> RadioLink for Box<L> {
    fn transmit(&mut self, frame: &[u8]) -> Result<()> {
        (**self).transmit(frame)
    }

    fn receive(&mut self, max_len: usize) -> Result<Bytes> {
        (**self).receive(max_len)
    }

    fn set_receive_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        (**self).set_receive_timeout(timeout)
    }
}
