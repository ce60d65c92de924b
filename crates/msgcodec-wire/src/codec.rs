use std::collections::BTreeMap;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{CodecError, Result, Section};
use crate::message::Message;

/// Maximum number of headers in one message.
pub const MAX_HEADERS: usize = 63;

/// Maximum byte length of a single header name or value.
pub const MAX_HEADER_FIELD_SIZE: usize = 1023;

/// Maximum payload size: 256 KiB.
pub const MAX_PAYLOAD_SIZE: usize = 256 * 1024;

/// Header count prefix: 1 byte.
pub const COUNT_SIZE: usize = 1;

/// One size table entry: a little-endian `u16`.
pub const SIZE_ENTRY_SIZE: usize = 2;

/// Check a message against the limits of the wire format.
///
/// Header count is checked first, then payload size, then each header in
/// ascending name order. The first violation is returned.
pub fn validate_message(message: &Message) -> Result<()> {
    if message.headers.len() > MAX_HEADERS {
        return Err(CodecError::InvalidHeaderCount {
            count: message.headers.len(),
            max: MAX_HEADERS,
        });
    }
    if message.payload.len() > MAX_PAYLOAD_SIZE {
        return Err(CodecError::PayloadTooLarge {
            size: message.payload.len(),
            max: MAX_PAYLOAD_SIZE,
        });
    }
    for (name, value) in &message.headers {
        let size = name.len().max(value.len());
        if size > MAX_HEADER_FIELD_SIZE {
            return Err(CodecError::HeaderFieldTooLarge {
                name: name.clone(),
                size,
                max: MAX_HEADER_FIELD_SIZE,
            });
        }
    }
    Ok(())
}

/// Encode a message into the wire format, appending to `dst`.
///
/// Wire format:
/// ```text
/// ┌───────────┬──────────────────────────┬──────────────────────┬───────────┐
/// │ Count     │ Size table               │ Header content       │ Payload   │
/// │ (1B)      │ count × (name_len,       │ name ‖ value, …      │ (rest)    │
/// │ 0..=63    │  value_len), u16 LE each │ ascending by name    │           │
/// └───────────┴──────────────────────────┴──────────────────────┴───────────┘
/// ```
///
/// On error nothing is written to `dst`.
pub fn encode_message(message: &Message, dst: &mut BytesMut) -> Result<()> {
    if let Err(err) = validate_message(message) {
        tracing::debug!(error = %err, "rejected message on encode");
        return Err(err);
    }

    let total = message.encoded_len();
    dst.reserve(total);

    // Limits above guarantee these narrowing casts are lossless.
    dst.put_u8(message.headers.len() as u8);
    for (name, value) in &message.headers {
        dst.put_u16_le(name.len() as u16);
        dst.put_u16_le(value.len() as u16);
    }
    for (name, value) in &message.headers {
        dst.put_slice(name.as_bytes());
        dst.put_slice(value.as_bytes());
    }
    dst.put_slice(&message.payload);

    tracing::debug!(
        headers = message.headers.len(),
        payload_size = message.payload.len(),
        wire_size = total,
        "encoded message"
    );
    Ok(())
}

/// Encode a message into a freshly allocated buffer.
pub fn encode(message: &Message) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    encode_message(message, &mut buf)?;
    Ok(buf.freeze())
}

/// Decode a message from a complete buffer.
///
/// Every declared length is checked against the bytes actually remaining
/// before it is sliced. Header bytes that are not valid UTF-8 are replaced
/// with U+FFFD. If a name repeats, the last value wins. Only the header
/// count limit is enforced here; field and payload sizes are bounded by the
/// buffer alone.
pub fn decode(src: &[u8]) -> Result<Message> {
    let result = decode_inner(src);
    match &result {
        Ok(message) => tracing::debug!(
            headers = message.headers.len(),
            payload_size = message.payload.len(),
            wire_size = src.len(),
            "decoded message"
        ),
        Err(err) => tracing::debug!(error = %err, wire_size = src.len(), "rejected buffer on decode"),
    }
    result
}

fn decode_inner(src: &[u8]) -> Result<Message> {
    let mut cursor = Cursor::new(src);

    let count = match cursor.take_u8() {
        Some(count) => usize::from(count),
        None => return Err(CodecError::EmptyInput),
    };
    if count > MAX_HEADERS {
        return Err(CodecError::InvalidHeaderCount {
            count,
            max: MAX_HEADERS,
        });
    }

    let table = cursor.take(count * 2 * SIZE_ENTRY_SIZE, Section::SizeTable)?;
    let sizes: Vec<usize> = table
        .chunks_exact(SIZE_ENTRY_SIZE)
        .map(|entry| usize::from(u16::from_le_bytes([entry[0], entry[1]])))
        .collect();

    let mut headers = BTreeMap::new();
    for pair in sizes.chunks_exact(2) {
        let name = cursor.take(pair[0], Section::HeaderContent)?;
        let value = cursor.take(pair[1], Section::HeaderContent)?;
        headers.insert(
            String::from_utf8_lossy(name).into_owned(),
            String::from_utf8_lossy(value).into_owned(),
        );
    }

    let payload = Bytes::copy_from_slice(cursor.rest());
    Ok(Message { headers, payload })
}

/// Read position over an untrusted buffer. Every advance is checked first.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take_u8(&mut self) -> Option<u8> {
        let byte = *self.buf.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    fn take(&mut self, len: usize, section: Section) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(CodecError::TruncatedInput {
                section,
                needed: len,
                remaining,
            });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn rest(self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}

/// The message codec as a value, for callers that pass a codec around.
///
/// Stateless; every call is independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageCodec;

impl MessageCodec {
    /// Create a codec.
    pub fn new() -> Self {
        Self
    }

    /// Encode a message. See [`encode`].
    pub fn encode(&self, message: &Message) -> Result<Bytes> {
        encode(message)
    }

    /// Decode a message. See [`decode`].
    pub fn decode(&self, data: &[u8]) -> Result<Message> {
        decode(data)
    }
}
