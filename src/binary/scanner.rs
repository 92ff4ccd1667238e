use super::tag;
use super::varint::{read_varint, zigzag_decode, MAX_LEN_32, MAX_LEN_64};
use crate::errors::MalformedInputKind;
use crate::tokenizer::{RawValue, Scan, ScanContext, ScanError, ScanResult, ScannedToken, Scanner};
use crate::TokenKind;
use encoding_rs::Encoding;

#[derive(Debug, Default)]
pub(crate) struct BinaryScanner;

#[inline]
fn fixed<const N: usize>(input: &[u8]) -> Option<[u8; N]> {
    input.get(1..=N)?.try_into().ok()
}

fn scan_string(input: &[u8]) -> Result<Option<(usize, RawValue)>, ScanError> {
    let Some((len, body_start)) = read_varint(input, 1, MAX_LEN_64)? else {
        return Ok(None);
    };

    let end = usize::try_from(len)
        .ok()
        .and_then(|len| body_start.checked_add(len))
        .ok_or(ScanError::Malformed(MalformedInputKind::NumberOverflow, 1))?;

    let Some(body) = input.get(body_start..end) else {
        return Ok(None);
    };

    let valid_up_to = Encoding::utf8_valid_up_to(body);

    if valid_up_to < body.len() {
        return Err(ScanError::Malformed(
            MalformedInputKind::InvalidUtf8,
            body_start + valid_up_to,
        ));
    }

    Ok(Some((
        end,
        RawValue::Text {
            range: body_start..end,
            escaped: false,
        },
    )))
}

fn scan_int32(input: &[u8]) -> Result<Option<(usize, RawValue)>, ScanError> {
    let Some((raw, end)) = read_varint(input, 1, MAX_LEN_32)? else {
        return Ok(None);
    };

    if raw > u64::from(u32::MAX) {
        return Err(ScanError::Malformed(MalformedInputKind::NumberOverflow, 1));
    }

    Ok(Some((
        end,
        RawValue::Integer {
            value: zigzag_decode(raw),
            text: None,
        },
    )))
}

fn scan_int64(input: &[u8]) -> Result<Option<(usize, RawValue)>, ScanError> {
    Ok(read_varint(input, 1, MAX_LEN_64)?.map(|(raw, end)| {
        (
            end,
            RawValue::Integer {
                value: zigzag_decode(raw),
                text: None,
            },
        )
    }))
}

impl Scanner for BinaryScanner {
    fn scan(&mut self, input: &[u8], ctx: ScanContext) -> ScanResult {
        let Some(&tag) = input.first() else {
            return Ok(Scan::Incomplete { consumed: 0 });
        };

        let payload = match tag {
            tag::START_OBJECT => Some((TokenKind::StartObject, 1, RawValue::None)),
            tag::END_OBJECT => Some((TokenKind::EndObject, 1, RawValue::None)),
            tag::START_ARRAY => Some((TokenKind::StartArray, 1, RawValue::None)),
            tag::END_ARRAY => Some((TokenKind::EndArray, 1, RawValue::None)),
            tag::TRUE => Some((TokenKind::True, 1, RawValue::None)),
            tag::FALSE => Some((TokenKind::False, 1, RawValue::None)),
            tag::NULL => Some((TokenKind::Null, 1, RawValue::None)),
            tag::STRING => scan_string(input)?.map(|(end, v)| (TokenKind::String, end, v)),
            tag::INT32 => scan_int32(input)?.map(|(end, v)| (TokenKind::Int32, end, v)),
            tag::INT64 => scan_int64(input)?.map(|(end, v)| (TokenKind::Int64, end, v)),
            tag::FLOAT32 => fixed(input).map(|bytes| {
                (TokenKind::Float32, 5, RawValue::Float32(f32::from_le_bytes(bytes)))
            }),
            tag::FLOAT64 => fixed(input).map(|bytes| {
                (TokenKind::Float64, 9, RawValue::Float64(f64::from_le_bytes(bytes)))
            }),
            _ => {
                return Err(ScanError::Malformed(
                    MalformedInputKind::UnknownTag(tag),
                    0,
                ))
            }
        };

        match payload {
            Some((kind, end, value)) => Ok(Scan::Token(ScannedToken {
                kind,
                start: 0,
                end,
                value,
            })),
            None if ctx.is_last => Err(ScanError::UnexpectedEnd(input.len())),
            None => Ok(Scan::Incomplete { consumed: 0 }),
        }
    }

    #[inline]
    fn unescape(raw: &[u8]) -> String {
        String::from_utf8_lossy(raw).into_owned()
    }
}
