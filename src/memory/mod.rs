mod carry_buffer;
mod limiter;

pub(crate) use self::carry_buffer::CarryBuffer;
pub use self::limiter::{MemoryLimitExceededError, MemoryLimiter, SharedMemoryLimiter};
