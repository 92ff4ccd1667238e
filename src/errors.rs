//! Error types produced by tokenizers and by the binary writer.

use crate::tokenizer::TokenKind;
use std::fmt::{self, Display};
use thiserror::Error;

pub use crate::binary::BinaryWriterError;
pub use crate::memory::MemoryLimitExceededError;
pub use crate::tokenizer::UnsupportedFormatError;

/// Protocol misuse by the driver. Always a caller bug, never retried internally.
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum InvalidStateError {
    #[error("Input was fed into the tokenizer after the end of input has been declared.")]
    FeedAfterEndOfInput,

    #[error("Input was fed into the tokenizer while {remaining} byte(s) of the previous input were not consumed yet.")]
    UndrainedInput { remaining: usize },

    #[error("Input range {offset}..{end} is out of bounds of the {len} byte(s) long buffer.")]
    InvalidInputRange {
        offset: usize,
        end: usize,
        len: usize,
    },

    #[error("There is no current token.")]
    NoCurrentToken,
}

/// Numeric representations requested through the typed accessors.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum NumberType {
    Int32,
    Int64,
    Float32,
    Float64,
}

impl Display for NumberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NumberType::Int32 => "a 32-bit integer",
            NumberType::Int64 => "a 64-bit integer",
            NumberType::Float32 => "a 32-bit float",
            NumberType::Float64 => "a 64-bit float",
        })
    }
}

/// A typed accessor was called for a token that carries no such value.
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum IllegalStateError {
    #[error("Token `{kind}` can't be read as {requested}.")]
    IncompatibleToken {
        kind: TokenKind,
        requested: NumberType,
    },
}

/// The value of the current token doesn't fit the requested representation.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("Value `{value}` can't be represented as {target}.")]
pub struct NumberFormatError {
    pub value: String,
    pub target: NumberType,
}

/// Grammar violations, reported with the absolute stream offset of the offending byte.
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum MalformedInputKind {
    #[error("unexpected byte 0x{0:02x}")]
    UnexpectedByte(u8),

    #[error("invalid escape sequence: backslash followed by 0x{0:02x}")]
    InvalidEscape(u8),

    #[error("invalid hexadecimal digit in a unicode escape")]
    InvalidUnicodeEscape,

    #[error("unpaired UTF-16 surrogate in a unicode escape")]
    LoneSurrogate,

    #[error("unescaped control character 0x{0:02x} in a string")]
    ControlCharacter(u8),

    #[error("invalid UTF-8 sequence")]
    InvalidUtf8,

    #[error("invalid number")]
    InvalidNumber,

    #[error("numeric overflow")]
    NumberOverflow,

    #[error("invalid literal")]
    InvalidLiteral,

    #[error("closing bracket without a matching opening one")]
    UnbalancedClose,

    #[error("closing bracket doesn't match the innermost open container")]
    MismatchedClose,

    #[error("unknown type tag 0x{0:02x}")]
    UnknownTag(u8),
}

/// Resource limits configured through [`TokenizerSettings`].
///
/// [`TokenizerSettings`]: crate::TokenizerSettings
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum LimitExceededError {
    #[error(transparent)]
    Memory(#[from] MemoryLimitExceededError),

    #[error("Maximum nesting depth of {max} has been exceeded.")]
    NestingDepth { max: usize },
}

/// The single error type of the [`Tokenizer`] contract.
///
/// [`Tokenizer`]: crate::Tokenizer
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum TokenizerError {
    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),

    #[error(transparent)]
    IllegalState(#[from] IllegalStateError),

    #[error("Malformed input at offset {offset}: {kind}.")]
    MalformedInput {
        kind: MalformedInputKind,
        offset: usize,
    },

    #[error("Unexpected end of input at offset {offset}.")]
    UnexpectedEndOfInput { offset: usize },

    #[error(transparent)]
    NumberFormat(#[from] NumberFormatError),

    #[error(transparent)]
    LimitExceeded(#[from] LimitExceededError),
}

impl TokenizerError {
    /// Returns `true` if the error ended the parse. Such an error is re-signalled
    /// by every subsequent `next_token` and `feed` call.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TokenizerError::MalformedInput { .. }
                | TokenizerError::UnexpectedEndOfInput { .. }
                | TokenizerError::LimitExceeded(_)
        )
    }
}

impl From<MemoryLimitExceededError> for TokenizerError {
    #[inline]
    fn from(err: MemoryLimitExceededError) -> Self {
        TokenizerError::LimitExceeded(err.into())
    }
}
