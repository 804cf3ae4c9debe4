//! Decoders for response payloads the ground station interprets.

use crate::cursor::FrameCursor;
use crate::error::Result;

/// Link statistics returned in a `RESP_PACKET_INFO` frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacketInfo {
    /// SNR of the last received packet, dB.
    ///
    /// Read as a signed byte, unlike the unsigned read some ground tools use,
    /// so a negative SNR does not decode as roughly +64 dB.
    pub snr_db: f32,
    /// RSSI of the last received packet, dBm.
    pub rssi_dbm: f32,
    pub lora_valid: u16,
    pub lora_invalid: u16,
    pub fsk_valid: u16,
    pub fsk_invalid: u16,
}

impl PacketInfo {
    /// Wire size of the optional data block.
    pub const LEN: usize = 10;

    /// Parse the optional data of a packet info response.
    ///
    /// Layout: SNR (i8, quarter dB), RSSI (u8, half dB below zero), then the
    /// valid/invalid LoRa and FSK frame counters as little-endian `u16`.
    /// Trailing bytes are ignored.
    pub fn parse(opt_data: &[u8]) -> Result<Self> {
        let mut cur = FrameCursor::new(opt_data);
        let snr = cur.read_i8()?;
        let rssi = cur.read_u8()?;

        Ok(Self {
            snr_db: f32::from(snr) / 4.0,
            rssi_dbm: f32::from(rssi) / -2.0,
            lora_valid: cur.read_u16_le()?,
            lora_invalid: cur.read_u16_le()?,
            fsk_valid: cur.read_u16_le()?,
            fsk_invalid: cur.read_u16_le()?,
        })
    }
}
