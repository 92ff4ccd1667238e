use super::tag;
use super::varint::{write_varint, zigzag_encode};
use crate::tokenizer::Container;
use thiserror::Error;

/// Misuse of a [`BinaryWriter`].
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum BinaryWriterError {
    #[error("Container end doesn't match the innermost open container.")]
    UnbalancedEnd,

    #[error("{0} container(s) left open.")]
    UnclosedContainers(usize),
}

/// Encoder for the tagged binary format read by [`BinaryTokenizer`].
///
/// ```
/// use pull_tokenizer::BinaryWriter;
///
/// let mut writer = BinaryWriter::default();
///
/// writer.start_object().string("answer").int32(42);
/// writer.end_object().unwrap();
///
/// assert_eq!(
///     writer.into_bytes().unwrap(),
///     [0x01, 0x05, 0x06, b'a', b'n', b's', b'w', b'e', b'r', 0x06, 0x54, 0x02]
/// );
/// ```
///
/// [`BinaryTokenizer`]: crate::BinaryTokenizer
#[derive(Debug, Default)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
    containers: Vec<Container>,
}

impl BinaryWriter {
    #[inline]
    fn tag(&mut self, tag: u8) -> &mut Self {
        self.buffer.push(tag);
        self
    }

    fn end(&mut self, container: Container, tag: u8) -> Result<&mut Self, BinaryWriterError> {
        match self.containers.last() {
            Some(&open) if open == container => {
                self.containers.pop();

                Ok(self.tag(tag))
            }
            _ => Err(BinaryWriterError::UnbalancedEnd),
        }
    }

    pub fn start_object(&mut self) -> &mut Self {
        self.containers.push(Container::Object);
        self.tag(tag::START_OBJECT)
    }

    pub fn end_object(&mut self) -> Result<&mut Self, BinaryWriterError> {
        self.end(Container::Object, tag::END_OBJECT)
    }

    pub fn start_array(&mut self) -> &mut Self {
        self.containers.push(Container::Array);
        self.tag(tag::START_ARRAY)
    }

    pub fn end_array(&mut self) -> Result<&mut Self, BinaryWriterError> {
        self.end(Container::Array, tag::END_ARRAY)
    }

    pub fn string(&mut self, value: &str) -> &mut Self {
        self.tag(tag::STRING);
        write_varint(&mut self.buffer, value.len() as u64);
        self.buffer.extend_from_slice(value.as_bytes());
        self
    }

    pub fn int32(&mut self, value: i32) -> &mut Self {
        self.tag(tag::INT32);
        write_varint(&mut self.buffer, zigzag_encode(i64::from(value)));
        self
    }

    pub fn int64(&mut self, value: i64) -> &mut Self {
        self.tag(tag::INT64);
        write_varint(&mut self.buffer, zigzag_encode(value));
        self
    }

    pub fn float32(&mut self, value: f32) -> &mut Self {
        self.tag(tag::FLOAT32);
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn float64(&mut self, value: f64) -> &mut Self {
        self.tag(tag::FLOAT64);
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.tag(if value { tag::TRUE } else { tag::FALSE })
    }

    pub fn null(&mut self) -> &mut Self {
        self.tag(tag::NULL)
    }

    /// Number of currently open containers.
    #[inline]
    pub fn depth(&self) -> usize {
        self.containers.len()
    }

    /// Returns the encoded bytes. All the containers must be closed.
    pub fn into_bytes(self) -> Result<Vec<u8>, BinaryWriterError> {
        if self.containers.is_empty() {
            Ok(self.buffer)
        } else {
            Err(BinaryWriterError::UnclosedContainers(self.containers.len()))
        }
    }
}
