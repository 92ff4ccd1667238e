use crate::errors::MalformedInputKind;
use crate::tokenizer::ScanError;
use encoding_rs::{Encoding, UTF_8};
use memchr::{memchr, memchr2};
use std::char::REPLACEMENT_CHARACTER;

/// Progress of a string whose closing quote hasn't arrived yet. Offsets are
/// relative to the opening quote.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) struct PartialString {
    scanned: usize,
    escaped: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum StringScan {
    Complete { end: usize, escaped: bool },
    Partial(PartialString),
}

#[inline]
fn check_control_chars(input: &[u8], from: usize, to: usize) -> Result<(), ScanError> {
    match input[from..to].iter().position(|&b| b < 0x20) {
        Some(pos) => Err(ScanError::Malformed(
            MalformedInputKind::ControlCharacter(input[from + pos]),
            from + pos,
        )),
        None => Ok(()),
    }
}

fn hex4(input: &[u8], pos: usize) -> Result<Option<u32>, ScanError> {
    let mut unit = 0;

    for i in pos..pos + 4 {
        let Some(&ch) = input.get(i) else {
            return Ok(None);
        };

        let digit = char::from(ch).to_digit(16).ok_or(ScanError::Malformed(
            MalformedInputKind::InvalidUnicodeEscape,
            i,
        ))?;

        unit = (unit << 4) | digit;
    }

    Ok(Some(unit))
}

/// Length of the escape sequence that starts with the backslash at `at`, or `None`
/// if the input ends before the sequence does.
fn escape_len(input: &[u8], at: usize) -> Result<Option<usize>, ScanError> {
    let lone_surrogate = ScanError::Malformed(MalformedInputKind::LoneSurrogate, at);

    let Some(&ch) = input.get(at + 1) else {
        return Ok(None);
    };

    match ch {
        b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => Ok(Some(2)),
        b'u' => match hex4(input, at + 2)? {
            None => Ok(None),
            Some(0xD800..=0xDBFF) => {
                match input.get(at + 6) {
                    None => return Ok(None),
                    Some(b'\\') => (),
                    Some(_) => return Err(lone_surrogate),
                }

                match input.get(at + 7) {
                    None => return Ok(None),
                    Some(b'u') => (),
                    Some(_) => return Err(lone_surrogate),
                }

                match hex4(input, at + 8)? {
                    None => Ok(None),
                    Some(0xDC00..=0xDFFF) => Ok(Some(12)),
                    Some(_) => Err(lone_surrogate),
                }
            }
            Some(0xDC00..=0xDFFF) => Err(lone_surrogate),
            Some(_) => Ok(Some(6)),
        },
        _ => Err(ScanError::Malformed(
            MalformedInputKind::InvalidEscape(ch),
            at + 1,
        )),
    }
}

#[inline]
fn partial(
    input: &[u8],
    start: usize,
    scanned_to: usize,
    escaped: bool,
    is_last: bool,
) -> Result<StringScan, ScanError> {
    if is_last {
        Err(ScanError::UnexpectedEnd(input.len()))
    } else {
        Ok(StringScan::Partial(PartialString {
            scanned: scanned_to - start,
            escaped,
        }))
    }
}

/// Scans the string whose opening quote is at `start`, resuming from `resume` if the
/// beginning of the string has already been scanned.
pub(super) fn scan_string(
    input: &[u8],
    start: usize,
    resume: Option<PartialString>,
    is_last: bool,
) -> Result<StringScan, ScanError> {
    let body_start = start + 1;

    let (mut pos, mut escaped) = match resume {
        Some(resume) => (start + resume.scanned, resume.escaped),
        None => (body_start, false),
    };

    loop {
        let Some(found) = memchr2(b'"', b'\\', &input[pos..]) else {
            check_control_chars(input, pos, input.len())?;

            return partial(input, start, input.len(), escaped, is_last);
        };

        let at = pos + found;

        check_control_chars(input, pos, at)?;

        if input[at] == b'"' {
            let body = &input[body_start..at];
            let valid_up_to = Encoding::utf8_valid_up_to(body);

            if valid_up_to < body.len() {
                return Err(ScanError::Malformed(
                    MalformedInputKind::InvalidUtf8,
                    body_start + valid_up_to,
                ));
            }

            return Ok(StringScan::Complete {
                end: at + 1,
                escaped,
            });
        }

        escaped = true;

        match escape_len(input, at)? {
            Some(len) => pos = at + len,
            None => return partial(input, start, at, escaped, is_last),
        }
    }
}

#[inline]
fn hex_value(digits: &[u8]) -> u32 {
    digits.iter().fold(0, |unit, &ch| {
        (unit << 4) | char::from(ch).to_digit(16).unwrap_or_default()
    })
}

fn decode_escape(escape: &[u8]) -> (char, usize) {
    let unit = |range| escape.get(range).map_or(0xFFFD, hex_value);

    match escape.get(1) {
        Some(b'b') => ('\u{8}', 2),
        Some(b'f') => ('\u{c}', 2),
        Some(b'n') => ('\n', 2),
        Some(b'r') => ('\r', 2),
        Some(b't') => ('\t', 2),
        Some(b'u') => {
            let high = unit(2..6);

            if (0xD800..=0xDBFF).contains(&high) {
                let low = unit(8..12);
                let code_point = 0x10000 + ((high - 0xD800) << 10) + (low.wrapping_sub(0xDC00) & 0x3FF);

                (char::from_u32(code_point).unwrap_or(REPLACEMENT_CHARACTER), 12)
            } else {
                (char::from_u32(high).unwrap_or(REPLACEMENT_CHARACTER), 6)
            }
        }
        Some(&ch) => (char::from(ch), 2),
        None => (REPLACEMENT_CHARACTER, 1),
    }
}

/// Decodes a validated string body that contains escape sequences.
pub(super) fn unescape(raw: &[u8]) -> String {
    let mut out = Vec::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(at) = memchr(b'\\', rest) {
        let (ch, len) = decode_escape(&rest[at..]);
        let mut buf = [0; 4];

        out.extend_from_slice(&rest[..at]);
        out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        rest = &rest[(at + len).min(rest.len())..];
    }

    out.extend_from_slice(rest);

    UTF_8.decode_without_bom_handling(&out).0.into_owned()
}
