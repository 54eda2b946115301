//! Packed binary string: arbitrary bytes stored two per code unit.
//!
//! # Layout
//! ```text
//! unit 0      parity marker
//!             0x0000            byte count is even
//!             0x0100 | bytes[0] byte count is odd; carries the first byte
//! unit 1..    remaining bytes, two per unit, big-endian within the unit
//! ```
//! The marker is what lets a reader recover an odd byte count, so any byte
//! sequence survives at a cost of at most one unit.  Empty bytes map to empty
//! text with no marker.

use byteorder::{BigEndian, ByteOrder};
use super::{malformed, Codec, CodecError, Encoding, Written};

pub struct BinStrCodec;

const ODD_FLAG: u16 = 0x0100;

impl Codec for BinStrCodec {
    fn encoding(&self) -> Encoding { Encoding::BinStr }

    fn encode_into(&self, dst: &mut [u8], text: &[u16]) -> Result<Written, CodecError> {
        let Some((&marker, rest)) = text.split_first() else {
            return Ok(Written::default());
        };

        let j = match marker {
            0 => 0,
            0x0100..=0x01FF => {
                if dst.is_empty() {
                    return Ok(Written::default());
                }
                dst[0] = marker as u8;
                1
            }
            _ => return Err(malformed("parity marker must be 0x0000 or 0x01xx", 0)),
        };

        let units = rest.len().min((dst.len() - j) / 2);
        BigEndian::write_u16_into(&rest[..units], &mut dst[j..j + units * 2]);
        Ok(Written { bytes_written: j + units * 2, units_consumed: 1 + units })
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<u16>, CodecError> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        let (marker, rest) = if bytes.len() % 2 == 1 {
            (ODD_FLAG | u16::from(bytes[0]), &bytes[1..])
        } else {
            (0, bytes)
        };
        let mut out = vec![0u16; rest.len() / 2 + 1];
        out[0] = marker;
        BigEndian::read_u16_into(rest, &mut out[1..]);
        Ok(out)
    }

    fn byte_length(&self, text: &[u16]) -> usize {
        match text.split_first() {
            None => 0,
            Some((&marker, rest)) => rest.len() * 2 + usize::from(marker != 0),
        }
    }
}
