use crate::harness::{ChunkedInput, TestToken, JSON_DOCUMENTS};
use pull_tokenizer::DataFormat;

#[test]
fn every_chunk_size_yields_the_same_tokens() {
    for document in JSON_DOCUMENTS {
        let bytes = document.as_bytes();
        let expected = ChunkedInput::with_chunk_size(bytes, bytes.len())
            .tokenize(DataFormat::Json)
            .unwrap();

        for chunk_size in 1..bytes.len() {
            let input = ChunkedInput::with_chunk_size(bytes, chunk_size);

            assert_eq!(
                input.tokenize(DataFormat::Json).unwrap(),
                expected,
                "Chunk size {chunk_size} of `{document}`"
            );
        }
    }
}

#[test]
fn random_splits() {
    for document in JSON_DOCUMENTS {
        let bytes = document.as_bytes();
        let expected = ChunkedInput::with_chunk_size(bytes, bytes.len())
            .tokenize(DataFormat::Json)
            .unwrap();

        for _ in 0..20 {
            let input = ChunkedInput::random_splits(bytes);

            assert_eq!(
                input.tokenize(DataFormat::Json).unwrap(),
                expected,
                "{input:?}"
            );
        }
    }
}

#[test]
fn random_chunk_size() {
    for document in JSON_DOCUMENTS {
        let input = ChunkedInput::new(document.as_bytes());

        assert!(input.chunk_count() >= 1);

        assert!(
            input.tokenize(DataFormat::Json).is_ok(),
            "{input:?} of `{document}`"
        );
    }
}

#[test]
fn empty_chunks_are_ignored() {
    let input = ChunkedInput::with_chunk_size(b"[1]", 1);
    let mut tokenizer = DataFormat::Json.tokenizer(&Default::default());

    tokenizer.feed_all(b"").unwrap();
    assert!(tokenizer.is_drained());

    let mut tokens = Vec::new();

    for (i, chunk) in [&b"[1"[..], &b""[..], &b"]"[..]].into_iter().enumerate() {
        tokenizer.feed_all(chunk).unwrap();
        crate::harness::pull(&mut *tokenizer, &mut tokens).unwrap();

        assert!(tokenizer.is_drained(), "Chunk {i}");
    }

    tokenizer.end_of_input();
    crate::harness::pull(&mut *tokenizer, &mut tokens).unwrap();

    assert_eq!(tokens, input.tokenize(DataFormat::Json).unwrap());
}

#[test]
fn long_numbers_split_byte_by_byte() {
    let zeros = "0".repeat(20_000);

    for (document, value) in [
        (format!("[1.{zeros}1]"), 1.0),
        (format!("[1e-{zeros}5]"), 1e-5),
        (format!("[-0.{zeros}]"), 0.0),
    ] {
        let input = ChunkedInput::with_chunk_size(document.as_bytes(), 1);

        assert_eq!(
            input.tokenize(DataFormat::Json).unwrap(),
            [
                TestToken::StartArray,
                TestToken::Float(value),
                TestToken::EndArray
            ]
        );
    }
}
