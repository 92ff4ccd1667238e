use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// A [`MemoryLimiter`] that can be shared by several tokenizers living on the same thread.
pub type SharedMemoryLimiter = Rc<RefCell<MemoryLimiter>>;

/// An error that occurs when the bytes carried over between input chunks exceed the memory limit.
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
#[error("Memory limit of {max} bytes has been exceeded: {current_usage} bytes were used.")]
pub struct MemoryLimitExceededError {
    pub current_usage: usize,
    pub max: usize,
}

/// Accounts the memory used by tokenizer carry-over buffers.
#[derive(Debug)]
pub struct MemoryLimiter {
    current_usage: usize,
    max: usize,
}

impl MemoryLimiter {
    pub fn new_shared(max: usize) -> SharedMemoryLimiter {
        Rc::new(RefCell::new(MemoryLimiter {
            max,
            current_usage: 0,
        }))
    }

    #[inline]
    pub fn current_usage(&self) -> usize {
        self.current_usage
    }

    #[inline]
    pub fn max(&self) -> usize {
        self.max
    }

    /// Reserves up to `byte_count` bytes without failing and returns the amount
    /// that was actually granted.
    #[inline]
    pub(crate) fn preallocate(&mut self, byte_count: usize) -> usize {
        let granted = byte_count.min(self.max.saturating_sub(self.current_usage));

        self.current_usage += granted;

        granted
    }

    #[inline]
    pub(crate) fn increase_usage(
        &mut self,
        byte_count: usize,
    ) -> Result<(), MemoryLimitExceededError> {
        let requested_usage = self.current_usage + byte_count;

        if requested_usage > self.max {
            Err(MemoryLimitExceededError {
                current_usage: requested_usage,
                max: self.max,
            })
        } else {
            self.current_usage = requested_usage;

            Ok(())
        }
    }

    #[inline]
    pub(crate) fn decrease_usage(&mut self, byte_count: usize) {
        self.current_usage -= byte_count;
    }
}
