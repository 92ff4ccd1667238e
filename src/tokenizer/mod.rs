//! The streaming tokenizer contract shared by all the wire formats.

#[macro_use]
mod state_machine;

mod current_token;
mod format;
mod scanner;
mod settings;
mod token_kind;

use crate::errors::TokenizerError;

pub(crate) use self::state_machine::TokenizerCore;
pub(crate) use self::scanner::{RawValue, Scan, ScanContext, ScanError, ScanResult, ScannedToken, Scanner};
pub(crate) use self::token_kind::Container;

pub use self::format::{DataFormat, UnsupportedFormatError};
pub use self::settings::{MemorySettings, TokenizerSettings};
pub use self::token_kind::TokenKind;

/// Lifecycle states of a [`Tokenizer`].
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum TokenizerState {
    /// The tokenizer accepts calls to [`Tokenizer::next_token`], and new input
    /// once the current one is drained.
    AcceptingInput,
    /// The last call to [`Tokenizer::next_token`] returned [`TokenKind::NotAvailable`].
    AwaitingMore,
    /// [`Tokenizer::end_of_input`] was called, no more input can be fed.
    EndOfInput,
    /// The end of the stream has been reached.
    Finished,
    /// A terminal error has occurred.
    Errored,
}

/// Incremental pull tokenizer for structured data fed by the caller in chunks.
///
/// The driver feeds a chunk with [`feed`] and calls [`next_token`] until it returns
/// [`TokenKind::NotAvailable`], then feeds the next chunk. Once the input is over, the
/// driver calls [`end_of_input`] and keeps pulling tokens until `next_token` returns
/// `None`.
///
/// ```
/// use pull_tokenizer::{JsonTokenizer, TokenKind, Tokenizer};
///
/// let mut tokenizer = JsonTokenizer::default();
/// let mut tokens = Vec::new();
///
/// for chunk in [&b"{\"answer\": 4"[..], &b"2}"[..]] {
///     tokenizer.feed_all(chunk).unwrap();
///
///     loop {
///         match tokenizer.next_token().unwrap() {
///             Some(TokenKind::NotAvailable) => break,
///             Some(kind) => tokens.push(kind),
///             None => unreachable!(),
///         }
///     }
/// }
///
/// tokenizer.end_of_input();
///
/// while let Some(kind) = tokenizer.next_token().unwrap() {
///     tokens.push(kind);
/// }
///
/// assert_eq!(
///     tokens,
///     [
///         TokenKind::StartObject,
///         TokenKind::String,
///         TokenKind::Int32,
///         TokenKind::EndObject
///     ]
/// );
/// ```
///
/// Input is borrowed, not copied: the chunk passed to `feed` must outlive the
/// tokenizer. Only a token that is split between two chunks gets copied into an
/// internal carry-over buffer, after which [`consumed_byte_count`] covers the whole
/// chunk and the caller doesn't need it anymore.
///
/// [`feed`]: Tokenizer::feed
/// [`next_token`]: Tokenizer::next_token
/// [`end_of_input`]: Tokenizer::end_of_input
/// [`consumed_byte_count`]: Tokenizer::consumed_byte_count
pub trait Tokenizer<'i> {
    /// Installs `data[offset..end]` as the next input window.
    ///
    /// # Errors
    ///
    /// [`InvalidStateError`] if the end of input has been declared, if the previous
    /// window hasn't been drained yet or if the range is out of bounds. If the tokenizer
    /// has failed before, the original error is returned.
    ///
    /// [`InvalidStateError`]: crate::errors::InvalidStateError
    fn feed(&mut self, data: &'i [u8], offset: usize, end: usize) -> Result<(), TokenizerError>;

    /// Installs the whole `data` as the next input window.
    #[inline]
    fn feed_all(&mut self, data: &'i [u8]) -> Result<(), TokenizerError> {
        self.feed(data, 0, data.len())
    }

    /// Declares that no more input will be fed. Calling it more than once is a no-op.
    fn end_of_input(&mut self);

    /// Advances the stream by exactly one token.
    ///
    /// Returns `None` when the stream is exhausted and
    /// `Some(TokenKind::NotAvailable)` when more input is required to determine the
    /// next token.
    fn next_token(&mut self) -> Result<Option<TokenKind>, TokenizerError>;

    /// Kind of the token returned by the last successful [`next_token`] call.
    ///
    /// [`next_token`]: Tokenizer::next_token
    fn current_token(&self) -> Option<TokenKind>;

    /// Textual representation of the current token, if there is one.
    fn get_string(&mut self) -> Result<Option<&str>, TokenizerError>;

    fn get_int_value(&self) -> Result<i32, TokenizerError>;

    fn get_long_value(&self) -> Result<i64, TokenizerError>;

    fn get_float_value(&self) -> Result<f32, TokenizerError>;

    fn get_double_value(&self) -> Result<f64, TokenizerError>;

    fn state(&self) -> TokenizerState;

    /// Number of fed bytes the tokenizer is done with, counting from the start of the
    /// stream. A byte is done with once it has been tokenized or copied into the
    /// carry-over buffer.
    fn consumed_byte_count(&self) -> usize;

    /// Returns `true` if the current input window is fully consumed and the next
    /// chunk can be fed.
    fn is_drained(&self) -> bool;

    /// Number of currently open containers.
    fn depth(&self) -> usize;
}
