use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::time::{Duration, Instant};

use bytes::Bytes;
use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::traits::{RadioLink, DEFAULT_MAX_FRAME_LEN};

/// UDP datagram link: one datagram is one radio frame.
///
/// Used to bridge to a modem gateway or SDR process that owns the actual air
/// interface. With a fixed peer, datagrams from any other address are
/// dropped. Without one, the link answers whoever sent the last frame.
pub struct UdpLink {
    socket: UdpSocket,
    peer: Option<SocketAddr>,
    last_sender: Option<SocketAddr>,
    max_transmit_len: usize,
    receive_timeout: Option<Duration>,
}

impl UdpLink {
    /// Bind a link on `local` that exchanges frames with `peer` only.
    pub fn bind(local: SocketAddr, peer: SocketAddr) -> Result<Self> {
        Self::bind_inner(local, Some(peer))
    }

    /// Bind a link on `local` that accepts frames from any sender.
    pub fn listen(local: SocketAddr) -> Result<Self> {
        Self::bind_inner(local, None)
    }

    fn bind_inner(local: SocketAddr, peer: Option<SocketAddr>) -> Result<Self> {
        let socket = UdpSocket::bind(local).map_err(|source| TransportError::Bind {
            addr: local,
            source,
        })?;
        let bound = socket.local_addr()?;
        info!(local = %bound, peer = ?peer, "udp link bound");

        Ok(Self {
            socket,
            peer,
            last_sender: None,
            max_transmit_len: DEFAULT_MAX_FRAME_LEN,
            receive_timeout: None,
        })
    }

    /// The address this link is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket.local_addr().map_err(Into::into)
    }

    /// The fixed peer, if any.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// The sender of the most recently accepted frame.
    pub fn last_sender(&self) -> Option<SocketAddr> {
        self.last_sender
    }

    /// Restrict the link to a single peer.
    pub fn set_peer(&mut self, peer: SocketAddr) {
        self.peer = Some(peer);
    }

    /// Largest frame `transmit` will put on the link.
    pub fn set_max_transmit_len(&mut self, max: usize) {
        self.max_transmit_len = max;
    }

    fn destination(&self) -> Result<SocketAddr> {
        self.peer.or(self.last_sender).ok_or(TransportError::NoPeer)
    }

    /// Receive one datagram from an accepted sender, giving up at `deadline`.
    fn receive_until(&mut self, max_len: usize, deadline: Option<Instant>) -> Result<Bytes> {
        let timeout = self.receive_timeout.unwrap_or_default();

        let mut buf = vec![0u8; max_len];
        loop {
            let (read, from) = match self.socket.recv_from(&mut buf) {
                Ok(received) => received,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    return Err(TransportError::Timeout(timeout));
                }
                Err(err) => return Err(TransportError::Io(err)),
            };

            match self.peer {
                Some(peer) if peer != from => {
                    debug!(%from, %peer, "dropping datagram from unexpected sender");
                    if let Some(deadline) = deadline {
                        let remaining = deadline.saturating_duration_since(Instant::now());
                        if remaining.is_zero() {
                            return Err(TransportError::Timeout(timeout));
                        }
                        self.socket.set_read_timeout(Some(remaining))?;
                    }
                    continue;
                }
                Some(_) => {}
                None => self.last_sender = Some(from),
            }

            buf.truncate(read);
            debug!(len = read, %from, "frame received");
            return Ok(Bytes::from(buf));
        }
    }
}

impl RadioLink for UdpLink {
    fn transmit(&mut self, frame: &[u8]) -> Result<()> {
        if frame.len() > self.max_transmit_len {
            return Err(TransportError::FrameTooLarge {
                len: frame.len(),
                max: self.max_transmit_len,
            });
        }

        let dest = self.destination()?;
        loop {
            match self.socket.send_to(frame, dest) {
                Ok(_) => break,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }

        debug!(len = frame.len(), %dest, "frame transmitted");
        Ok(())
    }

    fn receive(&mut self, max_len: usize) -> Result<Bytes> {
        let Some(timeout) = self.receive_timeout else {
            return self.receive_until(max_len, None);
        };

        let result = self.receive_until(max_len, Some(Instant::now() + timeout));
        // dropped datagrams shorten the socket timeout; put the configured one back
        self.socket.set_read_timeout(Some(timeout))?;
        result
    }

    fn set_receive_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.socket.set_read_timeout(timeout)?;
        self.receive_timeout = timeout;
        Ok(())
    }
}

impl std::fmt::Debug for UdpLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpLink")
            .field("local", &self.socket.local_addr().ok())
            .field("peer", &self.peer)
            .finish()
    }
}
