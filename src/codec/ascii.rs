//! 7-bit ASCII.  Lossy: every unit and every byte is masked to its low 7 bits,
//! so only text in 0x00–0x7F round-trips.

use super::{Codec, CodecError, Encoding, Written};

pub struct AsciiCodec;

impl Codec for AsciiCodec {
    fn encoding(&self) -> Encoding { Encoding::Ascii }

    fn encode_into(&self, dst: &mut [u8], text: &[u16]) -> Result<Written, CodecError> {
        let n = text.len().min(dst.len());
        for (out, &unit) in dst.iter_mut().zip(&text[..n]) {
            *out = (unit & 0x7F) as u8;
        }
        Ok(Written { bytes_written: n, units_consumed: n })
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<u16>, CodecError> {
        Ok(bytes.iter().map(|&b| u16::from(b & 0x7F)).collect())
    }

    fn byte_length(&self, text: &[u16]) -> usize {
        text.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_to_seven_bits() {
        let text = [0x41u16, 0xE9, 0x20AC];
        let bytes = AsciiCodec.encode_to_vec(&text).unwrap();
        assert_eq!(bytes, [0x41, 0x69, 0x2C]);
        assert_eq!(AsciiCodec.decode(&[0x41, 0xC1, 0xFF]).unwrap(), [0x41, 0x41, 0x7F]);
    }

    #[test]
    fn truncates_to_window() {
        let text: Vec<u16> = "hello".encode_utf16().collect();
        let mut buf = [0u8; 3];
        let w = AsciiCodec.encode_into(&mut buf, &text).unwrap();
        assert_eq!(w, Written { bytes_written: 3, units_consumed: 3 });
        assert_eq!(&buf, b"hel");
    }
}
