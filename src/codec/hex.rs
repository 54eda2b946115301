//! Hex: two digits per byte.  Either case is accepted when parsing; output is
//! always lower case.

use ::hex::FromHexError;
use super::{malformed, Codec, CodecError, Encoding, Written};

pub struct HexCodec;

impl Codec for HexCodec {
    fn encoding(&self) -> Encoding { Encoding::Hex }

    fn encode_into(&self, dst: &mut [u8], text: &[u16]) -> Result<Written, CodecError> {
        if text.len() % 2 != 0 {
            return Err(malformed("odd-length hex string", text.len() - 1));
        }
        let n = (text.len() / 2).min(dst.len());
        let digits = text[..n * 2]
            .iter()
            .enumerate()
            .map(|(pos, &unit)| {
                u8::try_from(unit)
                    .ok()
                    .filter(u8::is_ascii)
                    .ok_or_else(|| malformed("invalid hex digit", pos))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        ::hex::decode_to_slice(&digits, &mut dst[..n]).map_err(|e| match e {
            FromHexError::InvalidHexCharacter { index, .. } => malformed("invalid hex digit", index),
            _ => malformed("odd-length hex string", digits.len()),
        })?;
        Ok(Written { bytes_written: n, units_consumed: n * 2 })
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<u16>, CodecError> {
        Ok(::hex::encode(bytes).encode_utf16().collect())
    }

    fn byte_length(&self, text: &[u16]) -> usize {
        text.len() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn parses_digit_pairs() {
        assert_eq!(HexCodec.encode_to_vec(&units("a1b2")).unwrap(), [0xA1, 0xB2]);
        assert_eq!(HexCodec.encode_to_vec(&units("A1B2ff00")).unwrap(), [0xA1, 0xB2, 0xFF, 0x00]);
    }

    #[test]
    fn odd_length_fails() {
        assert_eq!(
            HexCodec.encode_to_vec(&units("a1b")),
            Err(CodecError::MalformedInput { reason: "odd-length hex string", position: 2 })
        );
    }

    #[test]
    fn bad_digit_reports_position() {
        assert!(matches!(
            HexCodec.encode_to_vec(&units("a1zz")),
            Err(CodecError::MalformedInput { position: 2, .. })
        ));
        // U+0161 must not be narrowed to 'a'.
        assert!(matches!(
            HexCodec.encode_to_vec(&[0x31, 0x0161]),
            Err(CodecError::MalformedInput { position: 1, .. })
        ));
    }

    #[test]
    fn lower_case_output() {
        let text = HexCodec.decode(&[0xDE, 0xAD, 0x0B]).unwrap();
        assert_eq!(String::from_utf16(&text).unwrap(), "dead0b");
    }

    #[test]
    fn truncates_to_window() {
        let mut buf = [0u8; 1];
        let w = HexCodec.encode_into(&mut buf, &units("0102")).unwrap();
        assert_eq!(w, Written { bytes_written: 1, units_consumed: 2 });
        assert_eq!(buf, [0x01]);
    }
}
