//! ***pull_tokenizer*** is an incremental pull tokenizer for structured data that arrives
//! in chunks.
//!
//! The caller feeds byte chunks as they arrive and pulls tokens one at a time through
//! the [`Tokenizer`] trait. When a chunk ends in the middle of a token, the tokenizer
//! returns [`TokenKind::NotAvailable`] and resumes once the next chunk is fed. Input is
//! borrowed, so token text is handed out without copying whenever a token doesn't
//! straddle a chunk boundary.
//!
//! Two wire formats are supported: JSON ([`JsonTokenizer`]) and a compact tagged binary
//! format ([`BinaryTokenizer`], encoded with [`BinaryWriter`]). [`DataFormat`] picks
//! the tokenizer for a content type.

#[macro_use]
mod debug_trace;

#[macro_use]
mod tokenizer;

mod binary;
mod json;
mod memory;

pub mod errors;

pub use self::binary::{BinaryTokenizer, BinaryWriter};
pub use self::json::JsonTokenizer;
pub use self::memory::{MemoryLimiter, SharedMemoryLimiter};
pub use self::tokenizer::{
    DataFormat, MemorySettings, TokenKind, Tokenizer, TokenizerSettings, TokenizerState,
};
