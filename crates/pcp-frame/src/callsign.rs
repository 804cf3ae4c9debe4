use std::fmt;
use std::str::FromStr;

use bytes::Bytes;

use crate::error::{FrameError, Result};

/// The station identifier that prefixes every frame.
///
/// Both ends of the link know it out-of-band; the frame carries neither its
/// length nor a terminator. Compared as opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Callsign(Bytes);

impl Callsign {
    /// Validate and wrap a callsign. Must be non-empty ASCII.
    pub fn new(callsign: impl Into<Bytes>) -> Result<Self> {
        let bytes = callsign.into();
        if bytes.is_empty() || !bytes.is_ascii() {
            return Err(FrameError::CallsignInvalid);
        }
        Ok(Self(bytes))
    }

    /// Wrap a compile-time callsign.
    pub fn from_static(callsign: &'static str) -> Result<Self> {
        Self::new(Bytes::from_static(callsign.as_bytes()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the callsign field on the wire.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed callsign.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Callsign {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Callsign {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl fmt::Display for Callsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ASCII is enforced at construction.
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ascii() {
        let cs: Callsign = "PLUTON-UPV".parse().unwrap();
        assert_eq!(cs.len(), 10);
        assert_eq!(cs.as_bytes(), b"PLUTON-UPV");
        assert_eq!(cs.to_string(), "PLUTON-UPV");
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            "".parse::<Callsign>(),
            Err(FrameError::CallsignInvalid)
        ));
    }

    #[test]
    fn rejects_non_ascii() {
        assert!(matches!(
            Callsign::new("PLUTÓN".to_string()),
            Err(FrameError::CallsignInvalid)
        ));
    }
}
