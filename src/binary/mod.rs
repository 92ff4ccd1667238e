//! Compact tagged binary format.
//!
//! Every token starts with a tag byte. Strings carry a LEB128 length prefix, integers
//! are zig-zag LEB128 encoded and floats are stored as little endian IEEE 754 values.
//! [`BinaryWriter`] produces this encoding.

mod scanner;
mod varint;
mod writer;

use self::scanner::BinaryScanner;
use crate::memory::SharedMemoryLimiter;
use crate::tokenizer::TokenizerCore;
use crate::{Tokenizer, TokenizerSettings};
use std::fmt::{self, Debug};

pub use self::writer::{BinaryWriter, BinaryWriterError};

pub(crate) mod tag {
    pub const START_OBJECT: u8 = 0x01;
    pub const END_OBJECT: u8 = 0x02;
    pub const START_ARRAY: u8 = 0x03;
    pub const END_ARRAY: u8 = 0x04;
    pub const STRING: u8 = 0x05;
    pub const INT32: u8 = 0x06;
    pub const INT64: u8 = 0x07;
    pub const FLOAT32: u8 = 0x08;
    pub const FLOAT64: u8 = 0x09;
    pub const TRUE: u8 = 0x0A;
    pub const FALSE: u8 = 0x0B;
    pub const NULL: u8 = 0x0C;
}

/// Streaming tokenizer for the tagged binary format.
pub struct BinaryTokenizer<'i> {
    core: TokenizerCore<'i, BinaryScanner>,
}

impl<'i> BinaryTokenizer<'i> {
    pub fn new(settings: &TokenizerSettings) -> Self {
        BinaryTokenizer {
            core: TokenizerCore::new(BinaryScanner, settings),
        }
    }

    /// Creates a tokenizer that accounts its carry-over buffer in `limiter`, which
    /// can be shared between several tokenizers.
    pub fn with_memory_limiter(settings: &TokenizerSettings, limiter: SharedMemoryLimiter) -> Self {
        BinaryTokenizer {
            core: TokenizerCore::with_memory_limiter(BinaryScanner, settings, limiter),
        }
    }
}

impl Default for BinaryTokenizer<'_> {
    #[inline]
    fn default() -> Self {
        Self::new(&TokenizerSettings::default())
    }
}

impl_tokenizer_for_core_newtype!(BinaryTokenizer);

impl Debug for BinaryTokenizer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryTokenizer")
            .field("state", &self.state())
            .field("depth", &self.depth())
            .field("current_token", &self.current_token())
            .finish()
    }
}
