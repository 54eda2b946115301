//! Legacy single-byte packing for engines whose strings mishandle units in
//! and above the surrogate range: one byte per unit, shifted up by 0x20 so
//! every unit lands in 0x20–0x11F.

use super::{Codec, CodecError, Encoding, Written};

pub struct BinStrIeCodec;

const SHIFT: u16 = 0x20;

impl Codec for BinStrIeCodec {
    fn encoding(&self) -> Encoding { Encoding::BinStrIe }

    fn encode_into(&self, dst: &mut [u8], text: &[u16]) -> Result<Written, CodecError> {
        let n = text.len().min(dst.len());
        for (out, &unit) in dst.iter_mut().zip(&text[..n]) {
            *out = unit.wrapping_sub(SHIFT) as u8;
        }
        Ok(Written { bytes_written: n, units_consumed: n })
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<u16>, CodecError> {
        Ok(bytes.iter().map(|&b| u16::from(b) + SHIFT).collect())
    }

    fn byte_length(&self, text: &[u16]) -> usize {
        text.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_byte_roundtrips() {
        let bytes: Vec<u8> = (0..=255).collect();
        let text = BinStrIeCodec.decode(&bytes).unwrap();
        assert_eq!(text.first(), Some(&0x20));
        assert_eq!(text.last(), Some(&0x11F));
        assert_eq!(BinStrIeCodec.encode_to_vec(&text).unwrap(), bytes);
    }

    #[test]
    fn units_below_shift_wrap() {
        assert_eq!(BinStrIeCodec.encode_to_vec(&[0x1F, 0x00]).unwrap(), [0xFF, 0xE0]);
    }
}
