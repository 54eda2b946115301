//! Codec registry: a closed set of encodings and the name resolver.
//!
//! # Direction
//! Every codec converts between host text (a slice of UTF-16 code units,
//! `&[u16]`) and raw bytes:
//!   - `encode` reads text and writes bytes into a caller-owned window.
//!   - `decode` reads bytes and produces text.
//!
//! For Base64, Hex and the binary-string schemes the *text* side is the
//! packed/printable form, so `encode` is the parsing direction and can fail
//! on structurally invalid text.
//!
//! # Truncation
//! A window too small for the whole output is not an error.  `encode` writes
//! as many complete units as fit and reports what it consumed in [`Written`].
//! A multi-byte unit is never split across the window end.
//!
//! The unit is codec-specific: a UTF-8 sequence, a UTF-16 unit, a byte pair
//! for Hex.  For Base64 it is a whole symbol group, so a window shorter than
//! 3 bytes may make no progress on a full group; resume with at least 3.
//!
//! # Aliases
//! Encoding names are matched case-insensitively against a frozen alias
//! table.  Unknown names fail at resolution time, never mid-transfer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod ascii;
mod base64;
mod binstr;
mod binstr_ie;
mod hex;
mod ucs2;
mod utf8;

pub use ascii::AsciiCodec;
pub use base64::Base64Codec;
pub use binstr::BinStrCodec;
pub use binstr_ie::BinStrIeCodec;
pub use hex::HexCodec;
pub use ucs2::Ucs2Codec;
pub use utf8::Utf8Codec;

// ── Encoding enum ────────────────────────────────────────────────────────────

/// Runtime encoding discriminant.  The set is closed; there is no plugin path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Encoding {
    Utf8,
    Ascii,
    Base64,
    Ucs2,
    Hex,
    BinStr,
    BinStrIe,
}

impl Encoding {
    /// Every encoding, in alias-table order.
    pub const ALL: [Encoding; 7] = [
        Encoding::Utf8,
        Encoding::Ascii,
        Encoding::Ucs2,
        Encoding::Hex,
        Encoding::Base64,
        Encoding::BinStr,
        Encoding::BinStrIe,
    ];

    /// Canonical name.  Always the first entry of [`Encoding::aliases`].
    pub fn name(self) -> &'static str {
        self.aliases()[0]
    }

    /// Lower-case names that resolve to this encoding.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Encoding::Utf8     => &["utf8", "utf-8"],
            Encoding::Ascii    => &["ascii", "binary"],
            Encoding::Ucs2     => &["ucs2", "ucs-2", "utf16le", "utf-16le"],
            Encoding::Hex      => &["hex"],
            Encoding::Base64   => &["base64"],
            Encoding::BinStr   => &["binary_string"],
            Encoding::BinStrIe => &["binary_string_ie"],
        }
    }

    /// Case-insensitive alias lookup.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "utf8" | "utf-8"                          => Some(Encoding::Utf8),
            "ascii" | "binary"                        => Some(Encoding::Ascii),
            "ucs2" | "ucs-2" | "utf16le" | "utf-16le" => Some(Encoding::Ucs2),
            "hex"                                     => Some(Encoding::Hex),
            "base64"                                  => Some(Encoding::Base64),
            "binary_string"                           => Some(Encoding::BinStr),
            "binary_string_ie"                        => Some(Encoding::BinStrIe),
            _                                         => None,
        }
    }

    /// The shared codec instance for this encoding.
    #[inline]
    pub fn codec(self) -> &'static dyn Codec {
        get_codec(self)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::from_name(s).ok_or_else(|| CodecError::UnsupportedEncoding(s.to_string()))
    }
}

impl From<Encoding> for &'static str {
    fn from(enc: Encoding) -> Self {
        enc.name()
    }
}

impl TryFrom<String> for Encoding {
    type Error = CodecError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// No alias matched.  Carries the name exactly as the caller supplied it.
    #[error("Unknown encoding: {0}")]
    UnsupportedEncoding(String),
    /// Structurally invalid input.  `position` indexes the offending byte
    /// (decode) or code unit (encode).
    #[error("Malformed input at position {position}: {reason}")]
    MalformedInput { reason: &'static str, position: usize },
    /// Offset/length outside the destination buffer.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub(crate) fn malformed(reason: &'static str, position: usize) -> CodecError {
    tracing::debug!(reason, position, "rejecting malformed input");
    CodecError::MalformedInput { reason, position }
}

// ── Encode result ────────────────────────────────────────────────────────────

/// Outcome of a single `encode` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Written {
    /// Bytes stored in the destination window.
    pub bytes_written: usize,
    /// Source code units fully consumed.  A surrogate pair counts as two.
    pub units_consumed: usize,
}

// ── Codec trait ──────────────────────────────────────────────────────────────

pub trait Codec: Send + Sync {
    fn encoding(&self) -> Encoding;

    /// Encode `text` into `dst`, which is exactly the caller's window.
    fn encode_into(&self, dst: &mut [u8], text: &[u16]) -> Result<Written, CodecError>;

    fn decode(&self, bytes: &[u8]) -> Result<Vec<u16>, CodecError>;

    /// Bytes `encode` would write into an unbounded window.
    fn byte_length(&self, text: &[u16]) -> usize;

    /// Encode `text` into `buf[offset..offset + length]`.
    ///
    /// Returns `Err(CodecError::InvalidArgument)` if the window does not lie
    /// inside `buf`.  Nothing outside the window is ever touched.
    fn encode(
        &self,
        buf:    &mut [u8],
        text:   &[u16],
        offset: usize,
        length: usize,
    ) -> Result<Written, CodecError> {
        let capacity = buf.len();
        let window = offset
            .checked_add(length)
            .and_then(|end| buf.get_mut(offset..end))
            .ok_or_else(|| {
                CodecError::InvalidArgument(format!(
                    "window [{offset}, {offset}+{length}) exceeds buffer of {capacity} bytes"
                ))
            })?;
        let written = self.encode_into(window, text)?;
        if written.units_consumed < text.len() {
            tracing::trace!(
                encoding = self.encoding().name(),
                consumed = written.units_consumed,
                total = text.len(),
                "encode truncated by destination window"
            );
        }
        Ok(written)
    }

    /// Encode the whole of `text` into a freshly allocated vector.
    fn encode_to_vec(&self, text: &[u16]) -> Result<Vec<u8>, CodecError> {
        let mut out = vec![0u8; self.byte_length(text)];
        let written = self.encode_into(&mut out, text)?;
        out.truncate(written.bytes_written);
        Ok(out)
    }
}

// ── Factory ──────────────────────────────────────────────────────────────────

static UTF8:      Utf8Codec     = Utf8Codec;
static ASCII:     AsciiCodec    = AsciiCodec;
static BASE64:    Base64Codec   = Base64Codec;
static UCS2:      Ucs2Codec     = Ucs2Codec;
static HEX:       HexCodec      = HexCodec;
static BINSTR:    BinStrCodec   = BinStrCodec;
static BINSTR_IE: BinStrIeCodec = BinStrIeCodec;

/// Resolve an [`Encoding`] to its shared codec.
pub fn get_codec(id: Encoding) -> &'static dyn Codec {
    match id {
        Encoding::Utf8     => &UTF8,
        Encoding::Ascii    => &ASCII,
        Encoding::Base64   => &BASE64,
        Encoding::Ucs2     => &UCS2,
        Encoding::Hex      => &HEX,
        Encoding::BinStr   => &BINSTR,
        Encoding::BinStrIe => &BINSTR_IE,
    }
}

/// Resolve an encoding name (or anything that displays as one) to a codec.
///
/// Returns `Err(CodecError::UnsupportedEncoding)` if no alias matches.
pub fn resolve(name: impl fmt::Display) -> Result<&'static dyn Codec, CodecError> {
    let name = name.to_string();
    match Encoding::from_name(&name) {
        Some(id) => {
            tracing::debug!(requested = %name, encoding = id.name(), "resolved encoding");
            Ok(get_codec(id))
        }
        None => {
            tracing::debug!(requested = %name, "unknown encoding");
            Err(CodecError::UnsupportedEncoding(name))
        }
    }
}
