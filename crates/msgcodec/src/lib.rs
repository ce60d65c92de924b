//! Compact binary codec for messages made of named string headers plus an
//! opaque byte payload.
//!
//! # Crate Structure
//!
//! - [`wire`] — Wire format: [`wire::encode`], [`wire::decode`], limits and errors
//!
//! The `msgcodec` binary (behind the `cli` feature) encodes, decodes and
//! inspects messages from the command line.

/// Re-export wire format types.
pub mod wire {
    pub use msgcodec_wire::*;
}

pub use msgcodec_wire::{decode, encode, CodecError, Message, MessageCodec};
