pub mod codec;
pub mod buffer;
pub mod text;

pub use codec::{resolve, get_codec, Codec, CodecError, Encoding, Written};
pub use buffer::ByteBuffer;
