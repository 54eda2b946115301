//! Host byte buffer used by storage consumers of the codec layer.
//!
//! [`ByteBuffer`] owns a fixed-size byte array.  Text goes in through
//! [`ByteBuffer::write`] and comes out through [`ByteBuffer::to_text`]; both
//! resolve the encoding name first, so an unknown name fails before any byte
//! is touched.  This is the call boundary where offsets are checked: codecs
//! only ever see a window that lies inside the buffer.

use std::fmt::Display;
use crate::codec::{resolve, CodecError, Written};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    /// Zero-filled buffer of `size` bytes.
    pub fn alloc(size: usize) -> Self {
        Self { data: vec![0u8; size] }
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Buffer sized to exactly hold `text` under `encoding`.
    pub fn from_text(text: &[u16], encoding: impl Display) -> Result<Self, CodecError> {
        let codec = resolve(encoding)?;
        Ok(Self { data: codec.encode_to_vec(text)? })
    }

    pub fn len(&self) -> usize { self.data.len() }

    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    pub fn as_bytes(&self) -> &[u8] { &self.data }

    pub fn into_bytes(self) -> Vec<u8> { self.data }

    /// Encode `text` starting at `offset`.
    ///
    /// `length` defaults to, and is clamped to, the bytes remaining after
    /// `offset`.  An `offset` past the end is `InvalidArgument`.
    pub fn write(
        &mut self,
        text:     &[u16],
        offset:   usize,
        length:   Option<usize>,
        encoding: impl Display,
    ) -> Result<Written, CodecError> {
        let codec = resolve(encoding)?;
        let remaining = self.data.len().checked_sub(offset).ok_or_else(|| {
            CodecError::InvalidArgument(format!(
                "offset {offset} is outside buffer of {} bytes",
                self.data.len()
            ))
        })?;
        let length = length.map_or(remaining, |l| l.min(remaining));
        codec.encode(&mut self.data, text, offset, length)
    }

    /// Decode `bytes[start..end]`.  Bounds are clamped to the buffer and an
    /// inverted range decodes as empty.
    pub fn to_text(
        &self,
        encoding: impl Display,
        start:    usize,
        end:      Option<usize>,
    ) -> Result<Vec<u16>, CodecError> {
        let codec = resolve(encoding)?;
        let end = end.map_or(self.data.len(), |e| e.min(self.data.len()));
        let start = start.min(end);
        codec.decode(&self.data[start..end])
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::from_bytes(data)
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
