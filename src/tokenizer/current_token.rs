use super::scanner::RawValue;
use super::token_kind::TokenKind;
use crate::errors::{IllegalStateError, NumberFormatError, NumberType, TokenizerError};
use encoding_rs::UTF_8;
use std::borrow::Cow;
use std::ops::Range;

/// Where the bytes of the current token live.
#[derive(Debug, Copy, Clone)]
pub(crate) enum TokenSource<'i> {
    /// The token was found in a caller's input chunk, ranges are relative to this slice.
    Input(&'i [u8]),
    /// The token was assembled in the carry-over buffer.
    Carry,
}

#[derive(Debug)]
pub(crate) struct CurrentToken<'i> {
    pub kind: TokenKind,
    value: RawValue,
    source: TokenSource<'i>,
    text: Option<Cow<'i, str>>,
}

#[inline]
fn decode(raw: &[u8]) -> Cow<'_, str> {
    // NOTE: scanners validate UTF-8 before they produce a token, so the lossy
    // fallback never kicks in.
    match UTF_8.decode_without_bom_handling_and_without_replacement(raw) {
        Some(text) => text,
        None => UTF_8.decode_without_bom_handling(raw).0,
    }
}

#[inline]
fn number_format(value: impl Into<String>, target: NumberType) -> TokenizerError {
    NumberFormatError {
        value: value.into(),
        target,
    }
    .into()
}

#[inline]
fn slice(bytes: &[u8], range: Range<usize>) -> &[u8] {
    &bytes[range]
}

impl<'i> CurrentToken<'i> {
    pub fn new(kind: TokenKind, value: RawValue, source: TokenSource<'i>) -> Self {
        CurrentToken {
            kind,
            value,
            source,
            text: None,
        }
    }

    /// Renders the token as text and caches the result.
    pub fn text(
        &mut self,
        carry: &[u8],
        unescape: impl FnOnce(&[u8]) -> String,
    ) -> &str {
        if self.text.is_none() {
            let text = match self.source {
                TokenSource::Input(bytes) => self.render(bytes, unescape),
                TokenSource::Carry => Cow::Owned(self.render(carry, unescape).into_owned()),
            };

            self.text = Some(text);
        }

        self.text.as_deref().unwrap_or_default()
    }

    fn render<'b>(&self, bytes: &'b [u8], unescape: impl FnOnce(&[u8]) -> String) -> Cow<'b, str> {
        if let Some(literal) = self.kind.literal() {
            return Cow::Borrowed(literal);
        }

        match &self.value {
            RawValue::Text { range, escaped } => {
                let raw = slice(bytes, range.clone());

                if *escaped {
                    Cow::Owned(unescape(raw))
                } else {
                    decode(raw)
                }
            }
            RawValue::Integer {
                text: Some(range), ..
            }
            | RawValue::DecimalText(range) => decode(slice(bytes, range.clone())),
            RawValue::Integer { value, text: None } => Cow::Owned(value.to_string()),
            RawValue::Float32(value) => Cow::Owned(value.to_string()),
            RawValue::Float64(value) => Cow::Owned(value.to_string()),
            RawValue::None => Cow::Borrowed(""),
        }
    }

    #[inline]
    fn incompatible(&self, requested: NumberType) -> TokenizerError {
        IllegalStateError::IncompatibleToken {
            kind: self.kind,
            requested,
        }
        .into()
    }

    /// Original text of a number whose value is parsed on demand.
    #[inline]
    fn decimal_text<'s>(&'s self, carry: &'s [u8], range: &Range<usize>) -> Cow<'s, str> {
        let bytes = match self.source {
            TokenSource::Input(bytes) => bytes,
            TokenSource::Carry => carry,
        };

        decode(slice(bytes, range.clone()))
    }

    pub fn long_value(&self) -> Result<i64, TokenizerError> {
        match self.value {
            RawValue::Integer { value, .. } => Ok(value),
            _ => Err(self.incompatible(NumberType::Int64)),
        }
    }

    pub fn int_value(&self) -> Result<i32, TokenizerError> {
        let value = match self.value {
            RawValue::Integer { value, .. } => value,
            _ => return Err(self.incompatible(NumberType::Int32)),
        };

        i32::try_from(value).map_err(|_| number_format(value.to_string(), NumberType::Int32))
    }

    pub fn double_value(&self, carry: &[u8]) -> Result<f64, TokenizerError> {
        match &self.value {
            RawValue::Integer { value, .. } => Ok(*value as f64),
            RawValue::Float32(value) => Ok(f64::from(*value)),
            RawValue::Float64(value) => Ok(*value),
            RawValue::DecimalText(range) => {
                let text = self.decimal_text(carry, range);

                match text.parse::<f64>() {
                    Ok(value) if value.is_finite() => Ok(value),
                    _ => Err(number_format(text, NumberType::Float64)),
                }
            }
            _ => Err(self.incompatible(NumberType::Float64)),
        }
    }

    pub fn float_value(&self, carry: &[u8]) -> Result<f32, TokenizerError> {
        match &self.value {
            RawValue::Float32(value) => Ok(*value),
            RawValue::Integer { value, .. } => Ok(*value as f32),
            RawValue::Float64(value) => {
                let narrow = *value as f32;

                // NOTE: precision loss is accepted, overflow is not.
                if narrow.is_infinite() && value.is_finite() {
                    Err(number_format(value.to_string(), NumberType::Float32))
                } else {
                    Ok(narrow)
                }
            }
            // NOTE: parsed straight to `f32`, so the value is rounded once.
            RawValue::DecimalText(range) => {
                let text = self.decimal_text(carry, range);

                match text.parse::<f32>() {
                    Ok(value) if value.is_finite() => Ok(value),
                    _ => Err(number_format(text, NumberType::Float32)),
                }
            }
            _ => Err(self.incompatible(NumberType::Float32)),
        }
    }
}
