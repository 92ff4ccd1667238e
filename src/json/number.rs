use super::is_delimited;
use crate::errors::MalformedInputKind;
use crate::tokenizer::ScanError;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    /// Expecting the first digit of the integer part.
    IntegerStart,
    IntegerDigits,
    /// The integer part is complete, it was a single `0`.
    AfterZero,
    /// Right after `.`.
    FractionStart,
    FractionDigits,
    /// Right after `e` or `E`.
    ExponentSign,
    /// Expecting the first digit of the exponent.
    ExponentStart,
    ExponentDigits,
}

impl Phase {
    #[inline]
    fn can_end(self) -> bool {
        matches!(
            self,
            Phase::IntegerDigits | Phase::AfterZero | Phase::FractionDigits | Phase::ExponentDigits
        )
    }

    #[inline]
    fn is_decimal(self) -> bool {
        !matches!(
            self,
            Phase::IntegerStart | Phase::IntegerDigits | Phase::AfterZero
        )
    }

    /// Next phase after `ch`, or `None` if `ch` can't continue the number.
    #[inline]
    fn next(self, ch: u8) -> Option<Phase> {
        Some(match (self, ch) {
            (Phase::IntegerStart, b'0') => Phase::AfterZero,
            (Phase::IntegerStart, b'1'..=b'9') => Phase::IntegerDigits,
            (Phase::FractionStart, b'0'..=b'9') => Phase::FractionDigits,
            (Phase::ExponentSign | Phase::ExponentStart, b'0'..=b'9') => Phase::ExponentDigits,
            (Phase::IntegerDigits | Phase::FractionDigits | Phase::ExponentDigits, b'0'..=b'9') => {
                self
            }
            (Phase::IntegerDigits | Phase::AfterZero, b'.') => Phase::FractionStart,
            (
                Phase::IntegerDigits | Phase::AfterZero | Phase::FractionDigits,
                b'e' | b'E',
            ) => Phase::ExponentSign,
            (Phase::ExponentSign, b'+' | b'-') => Phase::ExponentStart,
            _ => return None,
        })
    }
}

/// Progress of a number that may continue in the next input chunk. Offsets are
/// relative to the first byte of the number.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) struct PartialNumber {
    scanned: usize,
    phase: Phase,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum NumberScan {
    Integer { end: usize, value: i64 },
    Decimal { end: usize },
    Partial(PartialNumber),
}

#[inline]
fn invalid(pos: usize) -> ScanError {
    ScanError::Malformed(MalformedInputKind::InvalidNumber, pos)
}

fn parse_integer(digits: &[u8], negative: bool, start: usize) -> Result<i64, ScanError> {
    let overflow = ScanError::Malformed(MalformedInputKind::NumberOverflow, start);

    // NOTE: accumulate towards the negative side, so `i64::MIN` is representable.
    let mut value: i64 = 0;

    for &digit in digits {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_sub(i64::from(digit - b'0')))
            .ok_or(overflow)?;
    }

    if negative {
        Ok(value)
    } else {
        value.checked_neg().ok_or(overflow)
    }
}

/// Scans the number that starts at `start`, resuming from `resume` if the beginning
/// of the number has already been scanned.
pub(super) fn scan_number(
    input: &[u8],
    start: usize,
    resume: Option<PartialNumber>,
    is_last: bool,
) -> Result<NumberScan, ScanError> {
    let negative = input.get(start) == Some(&b'-');
    let int_start = if negative { start + 1 } else { start };

    let (mut pos, mut phase) = match resume {
        Some(resume) => (start + resume.scanned, resume.phase),
        None => (int_start, Phase::IntegerStart),
    };

    while let Some(&ch) = input.get(pos) {
        match phase.next(ch) {
            Some(next) => phase = next,
            None if phase == Phase::AfterZero && ch.is_ascii_digit() => return Err(invalid(pos)),
            None if phase.can_end() => break,
            None => return Err(invalid(pos)),
        }

        pos += 1;
    }

    if !is_delimited(input, pos, is_last)? {
        return Ok(NumberScan::Partial(PartialNumber {
            scanned: pos - start,
            phase,
        }));
    }

    if !phase.can_end() {
        return Err(ScanError::UnexpectedEnd(input.len()));
    }

    Ok(if phase.is_decimal() {
        NumberScan::Decimal { end: pos }
    } else {
        NumberScan::Integer {
            end: pos,
            value: parse_integer(&input[int_start..pos], negative, start)?,
        }
    })
}
