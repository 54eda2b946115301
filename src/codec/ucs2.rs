//! UCS-2 / UTF-16LE: one code unit per two little-endian bytes.  Surrogates
//! pass through as opaque units.

use byteorder::{ByteOrder, LittleEndian};
use super::{malformed, Codec, CodecError, Encoding, Written};

pub struct Ucs2Codec;

impl Codec for Ucs2Codec {
    fn encoding(&self) -> Encoding { Encoding::Ucs2 }

    fn encode_into(&self, dst: &mut [u8], text: &[u16]) -> Result<Written, CodecError> {
        // An odd trailing window byte cannot hold a unit and is left untouched.
        let n = text.len().min(dst.len() / 2);
        LittleEndian::write_u16_into(&text[..n], &mut dst[..n * 2]);
        Ok(Written { bytes_written: n * 2, units_consumed: n })
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<u16>, CodecError> {
        if bytes.len() % 2 != 0 {
            return Err(malformed("odd-length UTF-16LE input", bytes.len() - 1));
        }
        let mut out = vec![0u16; bytes.len() / 2];
        LittleEndian::read_u16_into(bytes, &mut out);
        Ok(out)
    }

    fn byte_length(&self, text: &[u16]) -> usize {
        text.len() * 2
    }
}
