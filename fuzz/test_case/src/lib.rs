use pull_tokenizer::errors::TokenizerError;
use pull_tokenizer::{DataFormat, TokenKind, Tokenizer, TokenizerSettings};
use rand::Rng;
use serde_json::Value;

#[derive(Debug, PartialEq)]
enum Outcome {
    Token(TokenKind, Option<String>, Option<i64>, Option<f64>),
    Error(TokenizerError),
}

fn read_token(tokenizer: &mut dyn Tokenizer<'_>, kind: TokenKind) -> Outcome {
    let long = tokenizer.get_long_value().ok();
    let double = tokenizer.get_double_value().ok().filter(|v| !v.is_nan());

    // NOTE: accessors must agree with each other.
    if let Ok(int) = tokenizer.get_int_value() {
        assert_eq!(Some(i64::from(int)), long);
    }

    if long.is_some() {
        assert!(double.is_some());
    }

    let text = tokenizer.get_string().unwrap().map(str::to_owned);

    assert_eq!(tokenizer.get_string().unwrap().map(str::to_owned), text);

    Outcome::Token(kind, text, long, double)
}

fn drain(tokenizer: &mut dyn Tokenizer<'_>, outcomes: &mut Vec<Outcome>) -> bool {
    loop {
        match tokenizer.next_token() {
            Ok(Some(TokenKind::NotAvailable)) => return true,
            Ok(Some(kind)) => outcomes.push(read_token(tokenizer, kind)),
            Ok(None) => return false,
            Err(err) => {
                assert!(err.is_terminal());
                assert_eq!(tokenizer.next_token(), Err(err.clone()));

                outcomes.push(Outcome::Error(err));

                return false;
            }
        }
    }
}

fn tokenize(format: DataFormat, chunks: &[&[u8]]) -> Vec<Outcome> {
    let mut tokenizer = format.tokenizer(&TokenizerSettings::default());
    let mut outcomes = Vec::new();

    for chunk in chunks {
        tokenizer.feed_all(chunk).unwrap();

        if !drain(&mut *tokenizer, &mut outcomes) {
            return outcomes;
        }

        assert!(tokenizer.is_drained());
    }

    tokenizer.end_of_input();
    drain(&mut *tokenizer, &mut outcomes);

    outcomes
}

/// Checks that splitting the input into chunks doesn't change the outcome.
fn run(format: DataFormat, data: &[u8]) -> Vec<Outcome> {
    let whole = tokenize(format, &[data]);

    if data.len() > 1 {
        let mut rng = rand::thread_rng();
        let mut chunks = Vec::new();
        let mut rest = data;

        while !rest.is_empty() {
            let (chunk, tail) = rest.split_at(rng.gen_range(1..=rest.len()));

            chunks.push(chunk);
            rest = tail;
        }

        assert_eq!(tokenize(format, &chunks), whole);
    }

    whole
}

fn integers_fit_i64(value: &Value) -> bool {
    match value {
        Value::Number(number) => number.is_i64() || !number.is_u64(),
        Value::Array(items) => items.iter().all(integers_fit_i64),
        Value::Object(members) => members.values().all(integers_fit_i64),
        _ => true,
    }
}

pub fn run_json(data: &[u8]) {
    let outcomes = run(DataFormat::Json, data);

    if let Ok(value) = serde_json::from_slice::<Value>(data) {
        if integers_fit_i64(&value) {
            assert!(
                !matches!(outcomes.last(), Some(Outcome::Error(_))),
                "{outcomes:?}"
            );
        }
    }
}

pub fn run_binary(data: &[u8]) {
    run(DataFormat::Binary, data);
}
