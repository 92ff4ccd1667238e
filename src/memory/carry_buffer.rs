use super::{MemoryLimitExceededError, SharedMemoryLimiter};

/// Bytes of a token that started in one input chunk and continues in the next one.
///
/// The buffer never gives memory back while it is alive: `reserved` only grows, and
/// every reserved byte is accounted in the limiter until the buffer is dropped.
#[derive(Debug)]
pub(crate) struct CarryBuffer {
    limiter: SharedMemoryLimiter,
    bytes: Vec<u8>,
    reserved: usize,
}

impl CarryBuffer {
    pub fn new(limiter: SharedMemoryLimiter, preallocated_size: usize) -> Self {
        let reserved = limiter.borrow_mut().preallocate(preallocated_size);

        CarryBuffer {
            limiter,
            bytes: Vec::with_capacity(reserved),
            reserved,
        }
    }

    pub fn extend(&mut self, chunk: &[u8]) -> Result<(), MemoryLimitExceededError> {
        let required = self.bytes.len() + chunk.len();

        if required > self.reserved {
            self.limiter
                .borrow_mut()
                .increase_usage(required - self.reserved)?;

            self.reserved = required;
        }

        self.bytes.extend_from_slice(chunk);

        Ok(())
    }

    /// Replaces the content of the buffer with `chunk`.
    pub fn reset_with(&mut self, chunk: &[u8]) -> Result<(), MemoryLimitExceededError> {
        self.bytes.clear();
        self.extend(chunk)
    }

    /// Drops the first `byte_count` bytes.
    #[inline]
    pub fn consume_front(&mut self, byte_count: usize) {
        self.bytes.drain(..byte_count);
    }

    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.bytes.truncate(len);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for CarryBuffer {
    fn drop(&mut self) {
        self.limiter.borrow_mut().decrease_usage(self.reserved);
    }
}
