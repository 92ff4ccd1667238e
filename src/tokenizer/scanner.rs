use super::token_kind::{Container, TokenKind};
use crate::errors::{MalformedInputKind, TokenizerError};
use std::ops::Range;

/// What the tokenizer core tells a format scanner about the input it passes in.
#[derive(Debug, Copy, Clone)]
pub(crate) struct ScanContext {
    /// No bytes will ever follow the scanned input.
    pub is_last: bool,
    /// The innermost container that is currently open.
    pub open_container: Option<Container>,
}

/// Value of a scanned token. Ranges are relative to the scanned input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawValue {
    None,
    Text {
        range: Range<usize>,
        escaped: bool,
    },
    Integer {
        value: i64,
        text: Option<Range<usize>>,
    },
    DecimalText(Range<usize>),
    Float32(f32),
    Float64(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScannedToken {
    pub kind: TokenKind,
    /// Offset of the first byte of the token.
    pub start: usize,
    /// Offset right after the last byte of the token. Everything before it is consumed.
    pub end: usize,
    pub value: RawValue,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Scan {
    Token(ScannedToken),
    /// The input ended before a token could be determined. The first `consumed` bytes
    /// (whitespace, separators) are accepted, the rest is the beginning of a token that
    /// should be passed in again, followed by more input.
    Incomplete { consumed: usize },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum ScanError {
    Malformed(MalformedInputKind, usize),
    UnexpectedEnd(usize),
}

impl ScanError {
    /// Converts the error into a tokenizer error, given the stream offset of the scanned input.
    #[inline]
    pub fn at(self, base_offset: usize) -> TokenizerError {
        match self {
            ScanError::Malformed(kind, pos) => TokenizerError::MalformedInput {
                kind,
                offset: base_offset + pos,
            },
            ScanError::UnexpectedEnd(pos) => TokenizerError::UnexpectedEndOfInput {
                offset: base_offset + pos,
            },
        }
    }
}

pub(crate) type ScanResult = Result<Scan, ScanError>;

/// Format-specific scanning logic plugged into the tokenizer core.
///
/// A scanner may be asked to scan the same token start more than once while the
/// token's bytes are arriving. It must not commit grammar state for a token until
/// it returns it.
pub(crate) trait Scanner {
    fn scan(&mut self, input: &[u8], ctx: ScanContext) -> ScanResult;

    /// Decodes text of a `Text` value that was scanned with `escaped: true`.
    fn unescape(raw: &[u8]) -> String;
}
