//! Compact binary wire format for messages carrying named string headers
//! and an opaque byte payload.
//!
//! Every encoded message is laid out as:
//! - A 1-byte header count (0-63)
//! - A size table of little-endian `u16` pairs (name length, value length)
//! - The concatenated header names and values, ordered by ascending name
//! - The payload, running to the end of the buffer
//!
//! No magic number, version byte, or checksum. One buffer holds exactly one message.

pub mod codec;
pub mod error;
pub mod message;

pub use codec::{
    decode, encode, encode_message, validate_message, MessageCodec, COUNT_SIZE,
    MAX_HEADERS, MAX_HEADER_FIELD_SIZE, MAX_PAYLOAD_SIZE, SIZE_ENTRY_SIZE,
};
pub use error::{CodecError, Result, Section};
pub use message::Message;
