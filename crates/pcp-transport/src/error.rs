use std::net::SocketAddr;
use std::time::Duration;

/// Errors that can occur on a radio link.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to bind to the specified local address.
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// No remote peer is known to transmit to.
    #[error("no peer address configured and nothing received yet")]
    NoPeer,

    /// An I/O error occurred on the link.
    #[error("link I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No frame arrived within the receive timeout.
    #[error("no frame received within {0:?}")]
    Timeout(Duration),

    /// The frame is larger than the link can carry.
    #[error("frame too large for link ({len} bytes, max {max})")]
    FrameTooLarge { len: usize, max: usize },

    /// The remote end of the link has gone away.
    #[error("link closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, TransportError>;
