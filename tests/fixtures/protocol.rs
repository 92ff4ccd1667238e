use pull_tokenizer::errors::{InvalidStateError, MalformedInputKind, TokenizerError};
use pull_tokenizer::{JsonTokenizer, TokenKind, Tokenizer, TokenizerState};

#[test]
fn empty_object() {
    let mut tokenizer = JsonTokenizer::default();

    tokenizer.feed_all(b"{}").unwrap();
    tokenizer.end_of_input();

    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::StartObject)));
    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::EndObject)));
    assert_eq!(tokenizer.next_token(), Ok(None));
    assert_eq!(tokenizer.state(), TokenizerState::Finished);

    // NOTE: the end of stream is sticky.
    assert_eq!(tokenizer.next_token(), Ok(None));
    assert_eq!(tokenizer.get_string(), Ok(None));
}

#[test]
fn digits_split_between_chunks() {
    let digits = "12345";

    for split in 0..=digits.len() {
        let (head, tail) = digits.as_bytes().split_at(split);
        let mut tokenizer = JsonTokenizer::default();

        tokenizer.feed_all(head).unwrap();
        assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::NotAvailable)));

        tokenizer.feed_all(tail).unwrap();
        assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::NotAvailable)));

        tokenizer.end_of_input();

        assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::Int32)));
        assert_eq!(tokenizer.get_int_value(), Ok(12345));
        assert_eq!(tokenizer.next_token(), Ok(None));
    }
}

#[test]
fn single_digit_value() {
    for chunks in [["5", ""], ["", "5"]] {
        let mut tokenizer = JsonTokenizer::default();

        for chunk in chunks {
            tokenizer.feed_all(chunk.as_bytes()).unwrap();
            assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::NotAvailable)));
        }

        tokenizer.end_of_input();

        assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::Int32)));
        assert_eq!(tokenizer.get_int_value(), Ok(5));
        assert_eq!(tokenizer.next_token(), Ok(None));
    }
}

#[test]
fn feed_while_undrained() {
    let mut tokenizer = JsonTokenizer::default();

    tokenizer.feed_all(b"[1, 2, 3]").unwrap();

    assert_eq!(
        tokenizer.feed_all(b"[]"),
        Err(TokenizerError::InvalidState(
            InvalidStateError::UndrainedInput { remaining: 9 }
        ))
    );

    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::StartArray)));
    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::Int32)));

    assert_eq!(
        tokenizer.feed_all(b"[]"),
        Err(TokenizerError::InvalidState(
            InvalidStateError::UndrainedInput { remaining: 7 }
        ))
    );

    // NOTE: misuse doesn't break the stream.
    assert_eq!(tokenizer.get_int_value(), Ok(1));
    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::Int32)));
    assert_eq!(tokenizer.get_int_value(), Ok(2));
}

#[test]
fn feed_after_end_of_input() {
    let mut tokenizer = JsonTokenizer::default();

    tokenizer.feed_all(b"1 ").unwrap();
    tokenizer.end_of_input();

    let err = Err(TokenizerError::InvalidState(
        InvalidStateError::FeedAfterEndOfInput,
    ));

    assert_eq!(tokenizer.feed_all(b"2"), err);
    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::Int32)));
    assert_eq!(tokenizer.next_token(), Ok(None));
    assert_eq!(tokenizer.feed_all(b"2"), err);
}

#[test]
fn end_of_input_is_idempotent() {
    let mut tokenizer = JsonTokenizer::default();

    tokenizer.feed_all(b"[true]").unwrap();
    tokenizer.end_of_input();
    tokenizer.end_of_input();

    assert_eq!(tokenizer.state(), TokenizerState::EndOfInput);
    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::StartArray)));

    tokenizer.end_of_input();

    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::True)));
    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::EndArray)));
    assert_eq!(tokenizer.next_token(), Ok(None));

    tokenizer.end_of_input();

    assert_eq!(tokenizer.state(), TokenizerState::Finished);
}

#[test]
fn input_range() {
    let data = b"xx[1]yy";
    let mut tokenizer = JsonTokenizer::default();

    assert_eq!(
        tokenizer.feed(data, 5, 2),
        Err(TokenizerError::InvalidState(
            InvalidStateError::InvalidInputRange {
                offset: 5,
                end: 2,
                len: 7
            }
        ))
    );

    assert_eq!(
        tokenizer.feed(data, 0, 8),
        Err(TokenizerError::InvalidState(
            InvalidStateError::InvalidInputRange {
                offset: 0,
                end: 8,
                len: 7
            }
        ))
    );

    tokenizer.feed(data, 2, 5).unwrap();
    tokenizer.end_of_input();

    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::StartArray)));
    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::Int32)));
    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::EndArray)));
    assert_eq!(tokenizer.next_token(), Ok(None));
    assert_eq!(tokenizer.consumed_byte_count(), 3);
}

#[test]
fn state_transitions() {
    let mut tokenizer = JsonTokenizer::default();

    assert_eq!(tokenizer.state(), TokenizerState::AcceptingInput);

    tokenizer.feed_all(b"[nu").unwrap();

    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::StartArray)));
    assert_eq!(tokenizer.state(), TokenizerState::AcceptingInput);
    assert_eq!(tokenizer.depth(), 1);

    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::NotAvailable)));
    assert_eq!(tokenizer.state(), TokenizerState::AwaitingMore);
    assert_eq!(tokenizer.current_token(), None);

    // NOTE: asking again without new input changes nothing.
    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::NotAvailable)));

    tokenizer.feed_all(b"ll]").unwrap();

    assert_eq!(tokenizer.state(), TokenizerState::AcceptingInput);
    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::Null)));
    assert_eq!(tokenizer.current_token(), Some(TokenKind::Null));
    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::EndArray)));
    assert_eq!(tokenizer.depth(), 0);

    tokenizer.end_of_input();

    assert_eq!(tokenizer.state(), TokenizerState::EndOfInput);
    assert_eq!(tokenizer.next_token(), Ok(None));
    assert_eq!(tokenizer.state(), TokenizerState::Finished);
}

#[test]
fn consumed_byte_count() {
    let mut tokenizer = JsonTokenizer::default();

    assert_eq!(tokenizer.consumed_byte_count(), 0);
    assert!(tokenizer.is_drained());

    tokenizer.feed_all(b"[10, 20").unwrap();

    assert!(!tokenizer.is_drained());
    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::StartArray)));
    assert_eq!(tokenizer.consumed_byte_count(), 1);
    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::Int32)));
    assert_eq!(tokenizer.consumed_byte_count(), 3);

    // NOTE: the unfinished number is copied, so the whole chunk is released.
    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::NotAvailable)));
    assert_eq!(tokenizer.consumed_byte_count(), 7);
    assert!(tokenizer.is_drained());

    tokenizer.feed_all(b"0]").unwrap();

    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::Int32)));
    assert_eq!(tokenizer.get_int_value(), Ok(200));
    assert_eq!(tokenizer.consumed_byte_count(), 8);
    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::EndArray)));
    assert_eq!(tokenizer.consumed_byte_count(), 9);
}

#[test]
fn excess_close_anywhere() {
    for (document, offset) in [("]", 0), ("[]]", 2), ("{\"a\": []}}", 9), ("[1, 2]] ", 6)] {
        let mut tokenizer = JsonTokenizer::default();
        let mut opened = 0;
        let mut closed = 0;

        tokenizer.feed_all(document.as_bytes()).unwrap();
        tokenizer.end_of_input();

        let err = loop {
            match tokenizer.next_token() {
                Ok(Some(TokenKind::StartArray | TokenKind::StartObject)) => opened += 1,
                Ok(Some(TokenKind::EndArray | TokenKind::EndObject)) => closed += 1,
                Ok(Some(_)) => (),
                Ok(None) => panic!("`{document}` is accepted"),
                Err(err) => break err,
            }
        };

        assert_eq!(opened, closed);

        assert_eq!(
            err,
            TokenizerError::MalformedInput {
                kind: MalformedInputKind::UnbalancedClose,
                offset
            }
        );
    }
}

#[test]
fn errors_are_sticky() {
    let mut tokenizer = JsonTokenizer::default();

    tokenizer.feed_all(b"[\"a\\q\"]").unwrap();

    let err = TokenizerError::MalformedInput {
        kind: MalformedInputKind::InvalidEscape(b'q'),
        offset: 4,
    };

    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::StartArray)));
    assert_eq!(tokenizer.next_token(), Err(err.clone()));
    assert!(err.is_terminal());
    assert_eq!(tokenizer.state(), TokenizerState::Errored);
    assert_eq!(tokenizer.current_token(), None);

    assert_eq!(tokenizer.next_token(), Err(err.clone()));
    assert_eq!(tokenizer.feed_all(b"[]"), Err(err.clone()));

    tokenizer.end_of_input();

    assert_eq!(tokenizer.state(), TokenizerState::Errored);
    assert_eq!(tokenizer.next_token(), Err(err));
}

#[test]
fn no_current_token() {
    let mut tokenizer = JsonTokenizer::default();

    assert_eq!(tokenizer.current_token(), None);
    assert_eq!(tokenizer.get_string(), Ok(None));

    assert_eq!(
        tokenizer.get_long_value(),
        Err(TokenizerError::InvalidState(InvalidStateError::NoCurrentToken))
    );

    tokenizer.feed_all(b"1").unwrap();

    assert_eq!(tokenizer.next_token(), Ok(Some(TokenKind::NotAvailable)));

    assert_eq!(
        tokenizer.get_double_value(),
        Err(TokenizerError::InvalidState(InvalidStateError::NoCurrentToken))
    );
}
