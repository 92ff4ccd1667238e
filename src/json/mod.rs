//! JSON ([RFC 8259]) tokenizer.
//!
//! [RFC 8259]: https://www.rfc-editor.org/rfc/rfc8259

mod number;
mod scanner;
mod string;

use self::scanner::JsonScanner;
use crate::errors::MalformedInputKind;
use crate::memory::SharedMemoryLimiter;
use crate::tokenizer::{ScanError, TokenizerCore};
use crate::{Tokenizer, TokenizerSettings};
use std::fmt::{self, Debug};

#[inline]
fn unexpected_byte(input: &[u8], pos: usize) -> ScanError {
    ScanError::Malformed(MalformedInputKind::UnexpectedByte(input[pos]), pos)
}

/// Checks the byte that follows a number or a literal. Returns `false` if the
/// input ends right after the token and more input may follow.
#[inline]
fn is_delimited(input: &[u8], end: usize, is_last: bool) -> Result<bool, ScanError> {
    match input.get(end) {
        Some(b' ' | b'\t' | b'\n' | b'\r' | b',' | b':' | b']' | b'}') => Ok(true),
        Some(_) => Err(unexpected_byte(input, end)),
        None => Ok(is_last),
    }
}

/// Streaming tokenizer for UTF-8 encoded JSON.
///
/// The input may contain several root values, optionally separated by whitespace.
pub struct JsonTokenizer<'i> {
    core: TokenizerCore<'i, JsonScanner>,
}

impl<'i> JsonTokenizer<'i> {
    pub fn new(settings: &TokenizerSettings) -> Self {
        JsonTokenizer {
            core: TokenizerCore::new(JsonScanner::default(), settings),
        }
    }

    /// Creates a tokenizer that accounts its carry-over buffer in `limiter`, which
    /// can be shared between several tokenizers.
    pub fn with_memory_limiter(settings: &TokenizerSettings, limiter: SharedMemoryLimiter) -> Self {
        JsonTokenizer {
            core: TokenizerCore::with_memory_limiter(JsonScanner::default(), settings, limiter),
        }
    }
}

impl Default for JsonTokenizer<'_> {
    #[inline]
    fn default() -> Self {
        Self::new(&TokenizerSettings::default())
    }
}

impl_tokenizer_for_core_newtype!(JsonTokenizer);

impl Debug for JsonTokenizer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonTokenizer")
            .field("state", &self.state())
            .field("depth", &self.depth())
            .field("current_token", &self.current_token())
            .finish()
    }
}
