use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use bytes::Bytes;
use tracing::trace;

use crate::error::{Result, TransportError};
use crate::traits::RadioLink;

/// One end of an in-process link pair.
///
/// Frames transmitted on one end are received, in order, on the other.
#[derive(Debug)]
pub struct MemoryLink {
    tx: Sender<Bytes>,
    rx: Receiver<Bytes>,
    receive_timeout: Option<Duration>,
}

impl MemoryLink {
    /// Create two connected link endpoints.
    pub fn pair() -> (Self, Self) {
        let (a_tx, b_rx) = mpsc::channel();
        let (b_tx, a_rx) = mpsc::channel();
        (
            Self {
                tx: a_tx,
                rx: a_rx,
                receive_timeout: None,
            },
            Self {
                tx: b_tx,
                rx: b_rx,
                receive_timeout: None,
            },
        )
    }
}

impl RadioLink for MemoryLink {
    fn transmit(&mut self, frame: &[u8]) -> Result<()> {
        trace!(len = frame.len(), "memory link transmit");
        self.tx
            .send(Bytes::copy_from_slice(frame))
            .map_err(|_| TransportError::Closed)
    }

    fn receive(&mut self, max_len: usize) -> Result<Bytes> {
        let mut frame = match self.receive_timeout {
            Some(timeout) => self.rx.recv_timeout(timeout).map_err(|err| match err {
                RecvTimeoutError::Timeout => TransportError::Timeout(timeout),
                RecvTimeoutError::Disconnected => TransportError::Closed,
            })?,
            None => self.rx.recv().map_err(|_| TransportError::Closed)?,
        };
        frame.truncate(max_len);
        Ok(frame)
    }

    fn set_receive_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.receive_timeout = timeout;
        Ok(())
    }
}
