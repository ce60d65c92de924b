use std::fmt;

/// Region of an encoded buffer that ended early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The `(name_len, value_len)` table following the count byte.
    SizeTable,
    /// The concatenated header names and values.
    HeaderContent,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::SizeTable => f.write_str("size table"),
            Section::HeaderContent => f.write_str("header content"),
        }
    }
}

/// Errors that can occur during message encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Too many headers on encode, or a count byte above the limit on decode.
    #[error("invalid header count ({count}, max {max})")]
    InvalidHeaderCount { count: usize, max: usize },

    /// A header name or value is longer than the format allows.
    #[error("header field too large in {name:?} ({size} bytes, max {max})")]
    HeaderFieldTooLarge {
        name: String,
        size: usize,
        max: usize,
    },

    /// The payload exceeds the format maximum.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// Decode was handed a zero-length buffer.
    #[error("empty input")]
    EmptyInput,

    /// The buffer ends before a declared region is fully present.
    #[error("truncated input in {section} (needed {needed} bytes, {remaining} remaining)")]
    TruncatedInput {
        section: Section,
        needed: usize,
        remaining: usize,
    },
}

pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = CodecError::TruncatedInput {
            section: Section::SizeTable,
            needed: 4,
            remaining: 1,
        };
        assert_eq!(
            err.to_string(),
            "truncated input in size table (needed 4 bytes, 1 remaining)"
        );

        let err = CodecError::PayloadTooLarge {
            size: 262_145,
            max: 262_144,
        };
        assert_eq!(err.to_string(), "payload too large (262145 bytes, max 262144)");
    }
}
