use super::test_token::{pull, TestToken};
use pull_tokenizer::errors::TokenizerError;
use pull_tokenizer::{DataFormat, TokenKind, TokenizerSettings};
use rand::{thread_rng, Rng};
use std::env;

/// Input split into chunks the way it would arrive from the network.
#[derive(Debug, Clone)]
pub struct ChunkedInput {
    chunks: Vec<Vec<u8>>,
}

impl ChunkedInput {
    /// Splits `bytes` into chunks of a random size, or of the size given in the
    /// `CHUNK_SIZE` environment variable.
    pub fn new(bytes: &[u8]) -> Self {
        let chunk_size = match env::var("CHUNK_SIZE") {
            Ok(val) => val.parse().unwrap(),
            Err(_) => {
                if bytes.len() > 1 {
                    thread_rng().gen_range(1..bytes.len())
                } else {
                    1
                }
            }
        };

        Self::with_chunk_size(bytes, chunk_size)
    }

    pub fn with_chunk_size(bytes: &[u8], chunk_size: usize) -> Self {
        ChunkedInput {
            chunks: bytes.chunks(chunk_size.max(1)).map(<[u8]>::to_vec).collect(),
        }
    }

    /// Splits `bytes` at random positions, so chunks have different sizes.
    pub fn random_splits(bytes: &[u8]) -> Self {
        let mut rng = thread_rng();
        let mut chunks = Vec::new();
        let mut rest = bytes;

        while !rest.is_empty() {
            let (chunk, tail) = rest.split_at(rng.gen_range(1..=rest.len().min(16)));

            chunks.push(chunk.to_vec());
            rest = tail;
        }

        ChunkedInput { chunks }
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn tokenize(&self, format: DataFormat) -> Result<Vec<TestToken>, TokenizerError> {
        self.tokenize_with_settings(format, &TokenizerSettings::default())
    }

    pub fn tokenize_with_settings(
        &self,
        format: DataFormat,
        settings: &TokenizerSettings,
    ) -> Result<Vec<TestToken>, TokenizerError> {
        let mut tokenizer = format.tokenizer(settings);
        let mut tokens = Vec::new();

        for chunk in &self.chunks {
            tokenizer.feed_all(chunk)?;

            assert_eq!(pull(&mut *tokenizer, &mut tokens)?, Some(TokenKind::NotAvailable));
            assert!(tokenizer.is_drained());
        }

        tokenizer.end_of_input();

        assert_eq!(pull(&mut *tokenizer, &mut tokens)?, None);

        Ok(tokens)
    }
}
