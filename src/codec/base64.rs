//! Base64 (RFC 4648 alphabet, `=` padding).
//!
//! Reading text is lenient: characters outside the alphabet are dropped, and
//! `-`/`_` are accepted as the URL-safe forms of 62/63.  What remains is read
//! as groups of up to four symbols.  A group ends after its fourth symbol or
//! at the first `=`, so padded chunks concatenated back to back decode chunk
//! by chunk.  A group of k symbols yields k−1 bytes; a lone symbol yields none.
//!
//! Writing bytes out always uses the standard alphabet with padding.

use ::base64::alphabet;
use ::base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use ::base64::engine::DecodePaddingMode;
use ::base64::Engine;
use super::{malformed, Codec, CodecError, Encoding, Written};

pub struct Base64Codec;

/// Decodes one group at a time: padding is stripped before it gets here and
/// short groups may carry non-zero trailing bits.
const GROUP_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

enum Char {
    Symbol(u8),
    Pad,
    Foreign,
}

#[inline]
fn classify(unit: u16) -> Char {
    match u8::try_from(unit) {
        Ok(b'=') => Char::Pad,
        Ok(b'-') => Char::Symbol(b'+'),
        Ok(b'_') => Char::Symbol(b'/'),
        Ok(b) if b.is_ascii_alphanumeric() || b == b'+' || b == b'/' => Char::Symbol(b),
        _ => Char::Foreign,
    }
}

/// Up to four symbols, normalized to the standard alphabet.
struct Group {
    symbols: [u8; 4],
    len:     usize,
    /// Text position of the group's first symbol.
    start:   usize,
}

impl Group {
    fn byte_len(&self) -> usize {
        self.len.saturating_sub(1)
    }
}

/// Next group at or after `*pos`.  Advances `*pos` past the group and any
/// padding that closes it.
fn next_group(text: &[u16], pos: &mut usize) -> Option<Group> {
    let mut group = Group { symbols: [0; 4], len: 0, start: *pos };
    let mut closed = false;
    while *pos < text.len() {
        match classify(text[*pos]) {
            Char::Symbol(_) if closed => break,
            Char::Symbol(c) => {
                if group.len == 0 {
                    group.start = *pos;
                }
                group.symbols[group.len] = c;
                group.len += 1;
                *pos += 1;
                if group.len == 4 {
                    break;
                }
            }
            Char::Pad => {
                closed = group.len > 0;
                *pos += 1;
            }
            Char::Foreign => *pos += 1,
        }
    }
    (group.len > 0).then_some(group)
}

impl Codec for Base64Codec {
    fn encoding(&self) -> Encoding { Encoding::Base64 }

    fn encode_into(&self, dst: &mut [u8], text: &[u16]) -> Result<Written, CodecError> {
        let mut pos = 0;
        let mut j = 0;
        let mut consumed = 0;

        while let Some(group) = next_group(text, &mut pos) {
            let n = group.byte_len();
            if j + n > dst.len() {
                return Ok(Written { bytes_written: j, units_consumed: consumed });
            }
            if n > 0 {
                let mut scratch = [0u8; 3];
                GROUP_ENGINE
                    .decode_slice(&group.symbols[..group.len], &mut scratch)
                    .map_err(|_| malformed("undecodable base64 group", group.start))?;
                dst[j..j + n].copy_from_slice(&scratch[..n]);
                j += n;
            }
            consumed = pos;
        }
        Ok(Written { bytes_written: j, units_consumed: text.len() })
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<u16>, CodecError> {
        Ok(STANDARD.encode(bytes).encode_utf16().collect())
    }

    fn byte_length(&self, text: &[u16]) -> usize {
        let mut pos = 0;
        let mut total = 0;
        while let Some(group) = next_group(text, &mut pos) {
            total += group.byte_len();
        }
        total
    }
}
