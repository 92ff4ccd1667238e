use super::number::{scan_number, NumberScan, PartialNumber};
use super::string::{scan_string, unescape, PartialString, StringScan};
use super::{is_delimited, unexpected_byte};
use crate::errors::MalformedInputKind;
use crate::tokenizer::{
    Container, RawValue, Scan, ScanContext, ScanError, ScanResult, ScannedToken, Scanner,
};
use crate::TokenKind;
use bitflags::bitflags;

bitflags! {
    /// Syntactic elements allowed at the current position.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    struct Expect: u8 {
        const VALUE = 1;
        const KEY = 1 << 1;
        const COLON = 1 << 2;
        const COMMA = 1 << 3;
        const END_OBJECT = 1 << 4;
        const END_ARRAY = 1 << 5;
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Grammar {
    Expect(Expect),
    /// A value has just been completed, what is allowed next depends on the
    /// enclosing container.
    AfterValue,
}

/// Scanning progress of a token that continues in the next input chunk.
#[derive(Debug, Copy, Clone)]
enum PartialToken {
    String(PartialString),
    Number(PartialNumber),
}

#[derive(Debug)]
pub(crate) struct JsonScanner {
    grammar: Grammar,
    partial: Option<PartialToken>,
}

impl Default for JsonScanner {
    fn default() -> Self {
        JsonScanner {
            grammar: Grammar::Expect(Expect::VALUE),
            partial: None,
        }
    }
}

#[inline]
fn token(kind: TokenKind, start: usize, end: usize, value: RawValue) -> Scan {
    Scan::Token(ScannedToken {
        kind,
        start,
        end,
        value,
    })
}

fn scan_literal(
    input: &[u8],
    start: usize,
    literal: &[u8],
    is_last: bool,
) -> Result<Option<usize>, ScanError> {
    let available = &input[start..];
    let len = available.len().min(literal.len());

    if available[..len] != literal[..len] {
        return Err(ScanError::Malformed(
            MalformedInputKind::InvalidLiteral,
            start,
        ));
    }

    if len < literal.len() {
        return if is_last {
            Err(ScanError::UnexpectedEnd(input.len()))
        } else {
            Ok(None)
        };
    }

    let end = start + literal.len();

    Ok(is_delimited(input, end, is_last)?.then_some(end))
}

impl JsonScanner {
    #[inline]
    fn expectation(&self, ctx: ScanContext) -> Expect {
        match self.grammar {
            Grammar::Expect(expect) => expect,
            Grammar::AfterValue => match ctx.open_container {
                Some(Container::Object) => Expect::COMMA | Expect::END_OBJECT,
                Some(Container::Array) => Expect::COMMA | Expect::END_ARRAY,
                None => Expect::VALUE,
            },
        }
    }

    #[inline]
    fn require(expect: Expect, allowed: Expect, input: &[u8], pos: usize) -> Result<(), ScanError> {
        if expect.intersects(allowed) {
            Ok(())
        } else {
            Err(unexpected_byte(input, pos))
        }
    }

    fn scan_token(&mut self, input: &[u8], start: usize, ctx: ScanContext) -> ScanResult {
        let expect = self.expectation(ctx);
        let partial = self.partial.take();
        let ch = input[start];

        macro_rules! incomplete {
            () => {
                return Ok(Scan::Incomplete { consumed: start })
            };
        }

        match ch {
            b'{' | b'[' => {
                Self::require(expect, Expect::VALUE, input, start)?;

                let (kind, next) = if ch == b'{' {
                    (TokenKind::StartObject, Expect::KEY | Expect::END_OBJECT)
                } else {
                    (TokenKind::StartArray, Expect::VALUE | Expect::END_ARRAY)
                };

                self.grammar = Grammar::Expect(next);

                Ok(token(kind, start, start + 1, RawValue::None))
            }
            b'}' | b']' => {
                let (container, kind, allowed) = if ch == b'}' {
                    (Container::Object, TokenKind::EndObject, Expect::END_OBJECT)
                } else {
                    (Container::Array, TokenKind::EndArray, Expect::END_ARRAY)
                };

                // NOTE: closes that don't match the open container are reported
                // by the tokenizer core.
                if ctx.open_container == Some(container) {
                    Self::require(expect, allowed, input, start)?;
                }

                self.grammar = Grammar::AfterValue;

                Ok(token(kind, start, start + 1, RawValue::None))
            }
            b'"' => {
                Self::require(expect, Expect::VALUE | Expect::KEY, input, start)?;

                let resume = match partial {
                    Some(PartialToken::String(partial)) => Some(partial),
                    _ => None,
                };

                match scan_string(input, start, resume, ctx.is_last)? {
                    StringScan::Complete { end, escaped } => {
                        self.grammar = if expect.contains(Expect::KEY) {
                            Grammar::Expect(Expect::COLON)
                        } else {
                            Grammar::AfterValue
                        };

                        Ok(token(
                            TokenKind::String,
                            start,
                            end,
                            RawValue::Text {
                                range: start + 1..end - 1,
                                escaped,
                            },
                        ))
                    }
                    StringScan::Partial(partial) => {
                        self.partial = Some(PartialToken::String(partial));

                        incomplete!();
                    }
                }
            }
            b'-' | b'0'..=b'9' => {
                Self::require(expect, Expect::VALUE, input, start)?;

                let resume = match partial {
                    Some(PartialToken::Number(partial)) => Some(partial),
                    _ => None,
                };

                match scan_number(input, start, resume, ctx.is_last)? {
                    NumberScan::Partial(partial) => {
                        self.partial = Some(PartialToken::Number(partial));

                        incomplete!();
                    }
                    NumberScan::Integer { end, value } => {
                        let kind = if i32::try_from(value).is_ok() {
                            TokenKind::Int32
                        } else {
                            TokenKind::Int64
                        };

                        self.grammar = Grammar::AfterValue;

                        Ok(token(
                            kind,
                            start,
                            end,
                            RawValue::Integer {
                                value,
                                text: Some(start..end),
                            },
                        ))
                    }
                    NumberScan::Decimal { end } => {
                        self.grammar = Grammar::AfterValue;

                        Ok(token(
                            TokenKind::Float64,
                            start,
                            end,
                            RawValue::DecimalText(start..end),
                        ))
                    }
                }
            }
            b't' | b'f' | b'n' => {
                Self::require(expect, Expect::VALUE, input, start)?;

                let kind = match ch {
                    b't' => TokenKind::True,
                    b'f' => TokenKind::False,
                    _ => TokenKind::Null,
                };

                let literal = kind.literal().unwrap_or_default().as_bytes();

                let Some(end) = scan_literal(input, start, literal, ctx.is_last)? else {
                    incomplete!();
                };

                self.grammar = Grammar::AfterValue;

                Ok(token(kind, start, end, RawValue::None))
            }
            _ => Err(unexpected_byte(input, start)),
        }
    }
}

impl Scanner for JsonScanner {
    fn scan(&mut self, input: &[u8], ctx: ScanContext) -> ScanResult {
        let mut pos = 0;

        while let Some(&ch) = input.get(pos) {
            match ch {
                b' ' | b'\t' | b'\n' | b'\r' => pos += 1,
                b',' => {
                    Self::require(self.expectation(ctx), Expect::COMMA, input, pos)?;

                    self.grammar = Grammar::Expect(match ctx.open_container {
                        Some(Container::Object) => Expect::KEY,
                        _ => Expect::VALUE,
                    });

                    pos += 1;
                }
                b':' => {
                    Self::require(self.expectation(ctx), Expect::COLON, input, pos)?;

                    self.grammar = Grammar::Expect(Expect::VALUE);
                    pos += 1;
                }
                _ => return self.scan_token(input, pos, ctx),
            }
        }

        Ok(Scan::Incomplete { consumed: pos })
    }

    #[inline]
    fn unescape(raw: &[u8]) -> String {
        unescape(raw)
    }
}
