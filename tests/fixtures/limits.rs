use crate::harness::ChunkedInput;
use pull_tokenizer::errors::{LimitExceededError, MemoryLimitExceededError, TokenizerError};
use pull_tokenizer::{
    DataFormat, JsonTokenizer, MemoryLimiter, MemorySettings, TokenKind, Tokenizer,
    TokenizerSettings,
};

fn settings(max_allowed_memory_usage: usize, max_nesting_depth: usize) -> TokenizerSettings {
    TokenizerSettings {
        memory_settings: MemorySettings {
            preallocated_carry_buffer_size: 16,
            max_allowed_memory_usage,
        },
        max_nesting_depth,
    }
}

#[test]
fn long_token_exceeds_memory_limit() {
    let document = format!("[\"{}\"]", "a".repeat(1000));
    let input = ChunkedInput::with_chunk_size(document.as_bytes(), 10);

    let err = input
        .tokenize_with_settings(DataFormat::Json, &settings(256, 1000))
        .unwrap_err();

    assert!(
        matches!(
            err,
            TokenizerError::LimitExceeded(LimitExceededError::Memory(MemoryLimitExceededError {
                max: 256,
                ..
            }))
        ),
        "{err:?}"
    );

    assert!(err.is_terminal());

    // NOTE: the same document fits if the token isn't split.
    assert!(ChunkedInput::with_chunk_size(document.as_bytes(), document.len())
        .tokenize_with_settings(DataFormat::Json, &settings(256, 1000))
        .is_ok());
}

#[test]
fn shared_memory_limiter() {
    let limiter = MemoryLimiter::new_shared(50);
    let settings = settings(50, 1000);

    let mut first = JsonTokenizer::with_memory_limiter(&settings, limiter.clone());
    let mut second = JsonTokenizer::with_memory_limiter(&settings, limiter.clone());

    assert_eq!(limiter.borrow().current_usage(), 32);

    first.feed_all(b"\"0123456789012345678901234").unwrap();
    assert_eq!(first.next_token(), Ok(Some(TokenKind::NotAvailable)));
    assert_eq!(limiter.borrow().current_usage(), 42);

    second.feed_all(b"\"0123456789012345678901234").unwrap();

    assert_eq!(
        second.next_token(),
        Err(TokenizerError::LimitExceeded(LimitExceededError::Memory(
            MemoryLimitExceededError {
                current_usage: 52,
                max: 50
            }
        )))
    );

    drop(first);
    drop(second);

    assert_eq!(limiter.borrow().current_usage(), 0);
}

#[test]
fn nesting_depth_limit() {
    let input = ChunkedInput::with_chunk_size(b"[[{\"a\": [[]]}]]", 3);

    assert!(input
        .tokenize_with_settings(DataFormat::Json, &settings(usize::MAX, 5))
        .is_ok());

    assert_eq!(
        input.tokenize_with_settings(DataFormat::Json, &settings(usize::MAX, 4)),
        Err(TokenizerError::LimitExceeded(LimitExceededError::NestingDepth {
            max: 4
        }))
    );
}

#[test]
fn default_nesting_depth() {
    let document = "[".repeat(1001);
    let mut tokenizer = JsonTokenizer::default();

    tokenizer.feed_all(document.as_bytes()).unwrap();

    for _ in 0..1000 {
        assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::StartArray)));
    }

    assert_eq!(tokenizer.depth(), 1000);

    assert_eq!(
        tokenizer.next_token(),
        Err(TokenizerError::LimitExceeded(LimitExceededError::NestingDepth {
            max: 1000
        }))
    );
}
