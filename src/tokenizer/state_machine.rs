use super::current_token::{CurrentToken, TokenSource};
use super::scanner::{Scan, ScanContext, ScannedToken, Scanner};
use super::settings::TokenizerSettings;
use super::token_kind::{Container, TokenKind};
use super::TokenizerState;
use crate::errors::{
    InvalidStateError, LimitExceededError, MalformedInputKind, TokenizerError,
};
use crate::memory::{CarryBuffer, MemoryLimiter, SharedMemoryLimiter};

// NOTE: when a token is split between chunks, bytes of the next chunk are moved into
// the carry-over buffer in steps that at least double the buffered amount, so a long
// token is rescanned a logarithmic number of times.
const MIN_CARRY_STEP: usize = 64;

/// State machine shared by all the wire formats. Owns the input window, the
/// carry-over buffer, the container stack and the current token; delegates the
/// grammar to `S`.
pub(crate) struct TokenizerCore<'i, S: Scanner> {
    scanner: S,
    state: TokenizerState,
    poison: Option<TokenizerError>,
    containers: Vec<Container>,
    max_nesting_depth: usize,
    window: &'i [u8],
    window_pos: usize,
    window_offset: usize,
    carry: CarryBuffer,
    carry_offset: usize,
    release_carry: bool,
    current: Option<CurrentToken<'i>>,
}

impl<'i, S: Scanner> TokenizerCore<'i, S> {
    pub fn new(scanner: S, settings: &TokenizerSettings) -> Self {
        let limiter =
            MemoryLimiter::new_shared(settings.memory_settings.max_allowed_memory_usage);

        Self::with_memory_limiter(scanner, settings, limiter)
    }

    pub fn with_memory_limiter(
        scanner: S,
        settings: &TokenizerSettings,
        limiter: SharedMemoryLimiter,
    ) -> Self {
        TokenizerCore {
            scanner,
            state: TokenizerState::AcceptingInput,
            poison: None,
            containers: Vec::default(),
            max_nesting_depth: settings.max_nesting_depth,
            window: &[],
            window_pos: 0,
            window_offset: 0,
            carry: CarryBuffer::new(
                limiter,
                settings.memory_settings.preallocated_carry_buffer_size,
            ),
            carry_offset: 0,
            release_carry: false,
            current: None,
        }
    }

    #[inline]
    fn set_state(&mut self, state: TokenizerState) {
        trace!(@state self.state => state);

        self.state = state;
    }

    #[inline]
    pub fn state(&self) -> TokenizerState {
        self.state
    }

    #[inline]
    pub fn consumed_byte_count(&self) -> usize {
        self.window_offset + self.window_pos
    }

    #[inline]
    pub fn is_drained(&self) -> bool {
        self.window_pos == self.window.len()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.containers.len()
    }

    pub fn feed(&mut self, data: &'i [u8], offset: usize, end: usize) -> Result<(), TokenizerError> {
        if let Some(err) = &self.poison {
            return Err(err.clone());
        }

        if matches!(
            self.state,
            TokenizerState::EndOfInput | TokenizerState::Finished
        ) {
            return Err(InvalidStateError::FeedAfterEndOfInput.into());
        }

        if !self.is_drained() {
            return Err(InvalidStateError::UndrainedInput {
                remaining: self.window.len() - self.window_pos,
            }
            .into());
        }

        let chunk = data
            .get(offset..end)
            .ok_or(InvalidStateError::InvalidInputRange {
                offset,
                end,
                len: data.len(),
            })?;

        trace!(@feed chunk);

        self.window_offset += self.window.len();
        self.window = chunk;
        self.window_pos = 0;
        self.set_state(TokenizerState::AcceptingInput);

        Ok(())
    }

    pub fn end_of_input(&mut self) {
        match self.state {
            TokenizerState::AcceptingInput | TokenizerState::AwaitingMore => {
                self.set_state(TokenizerState::EndOfInput);
            }
            _ => {
                trace!(@noop end of input in a terminal state);
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Option<TokenKind>, TokenizerError> {
        match self.state {
            TokenizerState::Errored => {
                if let Some(err) = &self.poison {
                    return Err(err.clone());
                }
            }
            TokenizerState::Finished => return Ok(None),
            _ => (),
        }

        self.current = None;

        if self.release_carry {
            self.carry.clear();
            self.release_carry = false;
        }

        let result = if self.carry.is_empty() {
            self.scan_window()
        } else {
            self.scan_carry()
        };

        match result {
            Ok(Some(TokenKind::NotAvailable)) => {
                self.set_state(TokenizerState::AwaitingMore);
            }
            Ok(None) => self.set_state(TokenizerState::Finished),
            Ok(Some(_)) => (),
            Err(ref err) => {
                trace!(@error err);

                self.current = None;
                self.poison = Some(err.clone());
                self.set_state(TokenizerState::Errored);
            }
        }

        result
    }

    #[inline]
    fn scan_context(&self, is_last: bool) -> ScanContext {
        ScanContext {
            is_last,
            open_container: self.containers.last().copied(),
        }
    }

    fn scan_window(&mut self) -> Result<Option<TokenKind>, TokenizerError> {
        let window = self.window;
        let input = &window[self.window_pos..];
        let base_offset = self.window_offset + self.window_pos;
        let ctx = self.scan_context(self.state == TokenizerState::EndOfInput);

        match self.scanner.scan(input, ctx).map_err(|e| e.at(base_offset))? {
            Scan::Token(token) => {
                self.window_pos += token.end;

                self.accept(token, TokenSource::Input(input), base_offset)
            }
            Scan::Incomplete { consumed } => {
                self.window_pos += consumed;

                if ctx.is_last {
                    return self.finish(base_offset + consumed);
                }

                let rest = &window[self.window_pos..];

                if !rest.is_empty() {
                    trace!(@carry rest);

                    self.carry.reset_with(rest)?;
                    self.carry_offset = self.consumed_byte_count();
                    self.window_pos = window.len();
                }

                Ok(Some(TokenKind::NotAvailable))
            }
        }
    }

    fn scan_carry(&mut self) -> Result<Option<TokenKind>, TokenizerError> {
        let window = self.window;
        let mut appended = 0;

        loop {
            let remaining = window.len() - self.window_pos;
            let ctx = self.scan_context(self.state == TokenizerState::EndOfInput && remaining == 0);
            let carry_offset = self.carry_offset;

            let outcome = self
                .scanner
                .scan(self.carry.bytes(), ctx)
                .map_err(|e| e.at(carry_offset))?;

            match outcome {
                Scan::Token(token) => {
                    // NOTE: bytes that follow the token were moved here from the
                    // window in this very call, so we can give them back.
                    let excess = self.carry.len() - token.end;

                    debug_assert!(excess <= appended);

                    self.window_pos -= excess.min(appended);
                    self.carry.truncate(token.end);
                    self.release_carry = true;

                    return self.accept(token, TokenSource::Carry, carry_offset);
                }
                Scan::Incomplete { consumed } => {
                    if consumed > 0 {
                        self.carry.consume_front(consumed);
                        self.carry_offset += consumed;

                        if self.carry.is_empty() {
                            return self.scan_window();
                        }
                    }

                    if ctx.is_last {
                        return self.finish(self.carry_offset);
                    }

                    if remaining == 0 {
                        trace!(@carry self.carry.bytes());

                        return Ok(Some(TokenKind::NotAvailable));
                    }

                    let step = remaining.min(self.carry.len().max(MIN_CARRY_STEP));

                    self.carry
                        .extend(&window[self.window_pos..self.window_pos + step])?;

                    self.window_pos += step;
                    appended += step;
                }
            }
        }
    }

    fn accept(
        &mut self,
        token: ScannedToken,
        source: TokenSource<'i>,
        base_offset: usize,
    ) -> Result<Option<TokenKind>, TokenizerError> {
        let offset = base_offset + token.start;

        if let Some(container) = Container::opened_by(token.kind) {
            if self.containers.len() >= self.max_nesting_depth {
                return Err(LimitExceededError::NestingDepth {
                    max: self.max_nesting_depth,
                }
                .into());
            }

            self.containers.push(container);
        } else if let Some(container) = Container::closed_by(token.kind) {
            let kind = match self.containers.last() {
                Some(&open) if open == container => None,
                Some(_) => Some(MalformedInputKind::MismatchedClose),
                None => Some(MalformedInputKind::UnbalancedClose),
            };

            if let Some(kind) = kind {
                return Err(TokenizerError::MalformedInput { kind, offset });
            }

            self.containers.pop();
        }

        trace!(@token token.kind, offset);

        self.current = Some(CurrentToken::new(token.kind, token.value, source));

        Ok(Some(token.kind))
    }

    fn finish(&mut self, offset: usize) -> Result<Option<TokenKind>, TokenizerError> {
        if self.containers.is_empty() {
            Ok(None)
        } else {
            Err(TokenizerError::UnexpectedEndOfInput { offset })
        }
    }

    #[inline]
    fn current(&self) -> Result<&CurrentToken<'i>, TokenizerError> {
        self.current
            .as_ref()
            .ok_or_else(|| InvalidStateError::NoCurrentToken.into())
    }

    #[inline]
    pub fn current_token(&self) -> Option<TokenKind> {
        self.current.as_ref().map(|t| t.kind)
    }

    pub fn get_string(&mut self) -> Result<Option<&str>, TokenizerError> {
        Ok(self
            .current
            .as_mut()
            .map(|current| current.text(self.carry.bytes(), S::unescape)))
    }

    pub fn get_int_value(&self) -> Result<i32, TokenizerError> {
        self.current()?.int_value()
    }

    pub fn get_long_value(&self) -> Result<i64, TokenizerError> {
        self.current()?.long_value()
    }

    pub fn get_float_value(&self) -> Result<f32, TokenizerError> {
        self.current()?.float_value(self.carry.bytes())
    }

    pub fn get_double_value(&self) -> Result<f64, TokenizerError> {
        self.current()?.double_value(self.carry.bytes())
    }
}

/// Implements [`Tokenizer`] for a format-specific newtype around [`TokenizerCore`].
///
/// [`Tokenizer`]: crate::Tokenizer
macro_rules! impl_tokenizer_for_core_newtype {
    ($Ty:ident) => {
        impl<'i> $crate::Tokenizer<'i> for $Ty<'i> {
            #[inline]
            fn feed(
                &mut self,
                data: &'i [u8],
                offset: usize,
                end: usize,
            ) -> Result<(), $crate::errors::TokenizerError> {
                self.core.feed(data, offset, end)
            }

            #[inline]
            fn end_of_input(&mut self) {
                self.core.end_of_input();
            }

            #[inline]
            fn next_token(
                &mut self,
            ) -> Result<Option<$crate::TokenKind>, $crate::errors::TokenizerError> {
                self.core.next_token()
            }

            #[inline]
            fn current_token(&self) -> Option<$crate::TokenKind> {
                self.core.current_token()
            }

            #[inline]
            fn get_string(&mut self) -> Result<Option<&str>, $crate::errors::TokenizerError> {
                self.core.get_string()
            }

            #[inline]
            fn get_int_value(&self) -> Result<i32, $crate::errors::TokenizerError> {
                self.core.get_int_value()
            }

            #[inline]
            fn get_long_value(&self) -> Result<i64, $crate::errors::TokenizerError> {
                self.core.get_long_value()
            }

            #[inline]
            fn get_float_value(&self) -> Result<f32, $crate::errors::TokenizerError> {
                self.core.get_float_value()
            }

            #[inline]
            fn get_double_value(&self) -> Result<f64, $crate::errors::TokenizerError> {
                self.core.get_double_value()
            }

            #[inline]
            fn state(&self) -> $crate::TokenizerState {
                self.core.state()
            }

            #[inline]
            fn consumed_byte_count(&self) -> usize {
                self.core.consumed_byte_count()
            }

            #[inline]
            fn is_drained(&self) -> bool {
                self.core.is_drained()
            }

            #[inline]
            fn depth(&self) -> usize {
                self.core.depth()
            }
        }
    };
}
