use crate::errors::MalformedInputKind;
use crate::tokenizer::ScanError;

/// Maximum encoded length of a 32-bit value.
pub(super) const MAX_LEN_32: usize = 5;
/// Maximum encoded length of a 64-bit value.
pub(super) const MAX_LEN_64: usize = 10;

/// Reads an unsigned LEB128 value that starts at `pos`. Returns the value and the
/// offset right after it, or `None` if the input ends in the middle of the value.
pub(super) fn read_varint(
    input: &[u8],
    pos: usize,
    max_len: usize,
) -> Result<Option<(u64, usize)>, ScanError> {
    let overflow = ScanError::Malformed(MalformedInputKind::NumberOverflow, pos);
    let mut value = 0;

    for i in 0..max_len {
        let Some(&byte) = input.get(pos + i) else {
            return Ok(None);
        };

        let shift = 7 * i as u32;
        let bits = u64::from(byte & 0x7F);

        if (bits << shift) >> shift != bits {
            return Err(overflow);
        }

        value |= bits << shift;

        if byte & 0x80 == 0 {
            return Ok(Some((value, pos + i + 1)));
        }
    }

    Err(overflow)
}

pub(super) fn write_varint(buffer: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buffer.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }

    buffer.push(value as u8);
}

#[inline]
pub(super) fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[inline]
pub(super) fn zigzag_decode(value: u64) -> i64 {
    (value >> 1) as i64 ^ -((value & 1) as i64)
}
