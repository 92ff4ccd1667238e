/// Specifies the memory settings for the carry-over buffer of a tokenizer.
#[derive(Debug, Clone)]
pub struct MemorySettings {
    /// Preallocated size of the buffer that holds a token split between two input chunks.
    ///
    /// ### Default
    ///
    /// `1024` bytes when constructed with `MemorySettings::default()`.
    pub preallocated_carry_buffer_size: usize,

    /// Maximum amount of memory the carry-over buffer may use. A token that doesn't fit
    /// fails the parse with [`LimitExceededError::Memory`].
    ///
    /// ### Default
    ///
    /// [`usize::MAX`] when constructed with `MemorySettings::default()`.
    ///
    /// [`LimitExceededError::Memory`]: crate::errors::LimitExceededError::Memory
    pub max_allowed_memory_usage: usize,
}

impl Default for MemorySettings {
    #[inline]
    fn default() -> Self {
        MemorySettings {
            preallocated_carry_buffer_size: 1024,
            max_allowed_memory_usage: usize::MAX,
        }
    }
}

/// Specifies settings shared by all tokenizer implementations.
#[derive(Debug, Clone)]
pub struct TokenizerSettings {
    /// Memory settings of the carry-over buffer.
    pub memory_settings: MemorySettings,

    /// Maximum number of containers that can be open at the same time.
    ///
    /// ### Default
    ///
    /// `1000` when constructed with `TokenizerSettings::default()`.
    pub max_nesting_depth: usize,
}

impl Default for TokenizerSettings {
    #[inline]
    fn default() -> Self {
        TokenizerSettings {
            memory_settings: MemorySettings::default(),
            max_nesting_depth: 1000,
        }
    }
}
