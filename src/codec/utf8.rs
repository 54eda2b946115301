//! UTF-8 over UTF-16 code units.
//!
//! A well-formed surrogate pair is combined into one supplementary code point
//! and written as a 4-byte sequence.  A lone surrogate has no scalar value, so
//! it is written as the 3-byte form of the unit itself; decoding that form
//! gives the unit back.

use super::{malformed, Codec, CodecError, Encoding, Written};

pub struct Utf8Codec;

#[inline]
fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

#[inline]
fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Code point starting at `text[i]` and the number of units it spans.
#[inline]
fn scalar_at(text: &[u16], i: usize) -> (u32, usize) {
    let unit = text[i];
    match text.get(i + 1) {
        Some(&next) if is_high_surrogate(unit) && is_low_surrogate(next) => {
            let cp = 0x10000 + ((u32::from(unit) & 0x3FF) << 10) + (u32::from(next) & 0x3FF);
            (cp, 2)
        }
        _ => (u32::from(unit), 1),
    }
}

#[inline]
fn sequence_len(cp: u32) -> usize {
    match cp {
        0..=0x7F       => 1,
        0x80..=0x7FF   => 2,
        0x800..=0xFFFF => 3,
        _              => 4,
    }
}

impl Codec for Utf8Codec {
    fn encoding(&self) -> Encoding { Encoding::Utf8 }

    fn encode_into(&self, dst: &mut [u8], text: &[u16]) -> Result<Written, CodecError> {
        let mut i = 0;
        let mut j = 0;
        while i < text.len() {
            let (cp, units) = scalar_at(text, i);
            let len = sequence_len(cp);
            if j + len > dst.len() {
                break;
            }
            let out = &mut dst[j..j + len];
            match len {
                1 => out[0] = cp as u8,
                2 => {
                    out[0] = 0xC0 | (cp >> 6) as u8;
                    out[1] = 0x80 | (cp & 0x3F) as u8;
                }
                3 => {
                    out[0] = 0xE0 | (cp >> 12) as u8;
                    out[1] = 0x80 | ((cp >> 6) & 0x3F) as u8;
                    out[2] = 0x80 | (cp & 0x3F) as u8;
                }
                _ => {
                    out[0] = 0xF0 | (cp >> 18) as u8;
                    out[1] = 0x80 | ((cp >> 12) & 0x3F) as u8;
                    out[2] = 0x80 | ((cp >> 6) & 0x3F) as u8;
                    out[3] = 0x80 | (cp & 0x3F) as u8;
                }
            }
            i += units;
            j += len;
        }
        Ok(Written { bytes_written: j, units_consumed: i })
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<u16>, CodecError> {
        let mut out = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            let lead = bytes[i];
            let (len, payload) = match lead {
                0x00..=0x7F => {
                    out.push(u16::from(lead));
                    i += 1;
                    continue;
                }
                0x80..=0xBF => return Err(malformed("continuation byte without a leading byte", i)),
                0xC0..=0xDF => (2, u32::from(lead & 0x1F)),
                0xE0..=0xEF => (3, u32::from(lead & 0x0F)),
                0xF0..=0xF7 => (4, u32::from(lead & 0x07)),
                _ => return Err(malformed("leading byte 11111xxx has no UTF-16 form", i)),
            };
            let seq = bytes
                .get(i..i + len)
                .ok_or_else(|| malformed("truncated multi-byte sequence", i))?;

            let mut cp = payload;
            for (k, &b) in seq.iter().enumerate().skip(1) {
                if b & 0xC0 != 0x80 {
                    return Err(malformed("expected continuation byte", i + k));
                }
                cp = (cp << 6) | u32::from(b & 0x3F);
            }

            if len == 4 {
                if !(0x10000..=0x10FFFF).contains(&cp) {
                    return Err(malformed("4-byte sequence outside the supplementary planes", i));
                }
                let v = cp - 0x10000;
                out.push(0xD800 | (v >> 10) as u16);
                out.push(0xDC00 | (v & 0x3FF) as u16);
            } else {
                out.push(cp as u16);
            }
            i += len;
        }
        Ok(out)
    }

    fn byte_length(&self, text: &[u16]) -> usize {
        let mut i = 0;
        let mut total = 0;
        while i < text.len() {
            let (cp, units) = scalar_at(text, i);
            total += sequence_len(cp);
            i += units;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn emoji_is_four_bytes() {
        let text = units("\u{1F600}");
        assert_eq!(text.len(), 2);
        let bytes = Utf8Codec.encode_to_vec(&text).unwrap();
        assert_eq!(bytes, [0xF0, 0x9F, 0x98, 0x80]);
        assert_eq!(Utf8Codec.byte_length(&text), 4);
        assert_eq!(Utf8Codec.decode(&bytes).unwrap(), text);
    }

    #[test]
    fn matches_std_for_valid_text() {
        let s = "aé€\u{10348}\u{10FFFF}z\u{7FF}\u{800}";
        let text = units(s);
        let bytes = Utf8Codec.encode_to_vec(&text).unwrap();
        assert_eq!(bytes, s.as_bytes());
        assert_eq!(Utf8Codec.byte_length(&text), s.len());
        assert_eq!(Utf8Codec.decode(s.as_bytes()).unwrap(), text);
    }

    #[test]
    fn lone_surrogates_take_three_bytes() {
        let text = [0xD800u16, 0x41, 0xDC00];
        let bytes = Utf8Codec.encode_to_vec(&text).unwrap();
        assert_eq!(bytes, [0xED, 0xA0, 0x80, 0x41, 0xED, 0xB0, 0x80]);
        assert_eq!(Utf8Codec.byte_length(&text), 7);
        assert_eq!(Utf8Codec.decode(&bytes).unwrap(), text);
    }

    #[test]
    fn truncation_never_splits_a_sequence() {
        let text = units("a\u{1F600}b");
        let mut buf = [0u8; 4];
        let w = Utf8Codec.encode_into(&mut buf, &text).unwrap();
        assert_eq!(w, Written { bytes_written: 1, units_consumed: 1 });

        let mut buf = [0u8; 5];
        let w = Utf8Codec.encode_into(&mut buf, &text).unwrap();
        assert_eq!(w, Written { bytes_written: 5, units_consumed: 3 });

        let text = units("é");
        let mut buf = [0u8; 1];
        let w = Utf8Codec.encode_into(&mut buf, &text).unwrap();
        assert_eq!(w, Written::default());
    }

    #[test]
    fn stray_continuation_byte_fails() {
        assert_eq!(
            Utf8Codec.decode(&[0x41, 0x80]),
            Err(CodecError::MalformedInput {
                reason: "continuation byte without a leading byte",
                position: 1,
            })
        );
    }

    #[test]
    fn invalid_leading_byte_fails() {
        assert!(matches!(
            Utf8Codec.decode(&[0xF8, 0x80, 0x80, 0x80, 0x80]),
            Err(CodecError::MalformedInput { position: 0, .. })
        ));
        assert!(Utf8Codec.decode(&[0xFF]).is_err());
    }

    #[test]
    fn truncated_sequence_fails() {
        assert!(matches!(
            Utf8Codec.decode(&[0x61, 0xE2, 0x82]),
            Err(CodecError::MalformedInput { position: 1, .. })
        ));
        assert!(Utf8Codec.decode(&[0xF0, 0x9F, 0x98]).is_err());
    }

    #[test]
    fn non_continuation_inside_sequence_fails() {
        assert!(matches!(
            Utf8Codec.decode(&[0xC3, 0x41]),
            Err(CodecError::MalformedInput { position: 1, .. })
        ));
    }

    #[test]
    fn out_of_range_four_byte_fails() {
        // U+110000
        assert!(Utf8Codec.decode(&[0xF4, 0x90, 0x80, 0x80]).is_err());
    }
}
