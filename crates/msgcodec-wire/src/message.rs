use std::collections::BTreeMap;

use bytes::Bytes;

use crate::codec::{COUNT_SIZE, SIZE_ENTRY_SIZE};

/// A set of named string headers plus an opaque payload.
///
/// Headers live in a key-ordered map, so iteration (and therefore the wire
/// order) is ascending by name regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// Header name to header value.
    pub headers: BTreeMap<String, String>,
    /// The message payload.
    pub payload: Bytes,
}

impl Message {
    /// Create a new message.
    pub fn new(headers: BTreeMap<String, String>, payload: impl Into<Bytes>) -> Self {
        Self {
            headers,
            payload: payload.into(),
        }
    }

    /// A message with no headers and an empty payload.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add or replace a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Look up a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// The exact number of bytes `encode` produces for this message.
    pub fn encoded_len(&self) -> usize {
        let content: usize = self
            .headers
            .iter()
            .map(|(name, value)| name.len() + value.len())
            .sum();
        COUNT_SIZE + self.headers.len() * 2 * SIZE_ENTRY_SIZE + content + self.payload.len()
    }
}
