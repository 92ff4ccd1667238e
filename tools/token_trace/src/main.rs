use getopts::{Matches, Options};
use pull_tokenizer::{DataFormat, TokenKind, Tokenizer, TokenizerSettings};
use std::env::args;
use std::fs;
use std::process::ExitCode;

fn parse_options() -> Option<Matches> {
    let mut opts = Options::new();

    opts.optopt(
        "t",
        "content_type",
        "Content type of the input",
        "-t (application/json|application/x-tagged-data)",
    );

    opts.optopt("c", "chunk_size", "Chunk size", "-c");
    opts.optflag("h", "help", "Show this help");

    let matches = match opts.parse(args().skip(1)) {
        Ok(matches) => {
            if matches.free.is_empty() {
                eprintln!("Missing input file");
                None
            } else if matches.opt_present("h") {
                None
            } else {
                Some(matches)
            }
        }
        Err(e) => {
            eprintln!("{e}");
            None
        }
    };

    if matches.is_none() {
        eprintln!(
            "{}",
            opts.usage("Usage: cargo run -p token_trace -- [options] INPUT_FILE")
        );
    }

    matches
}

fn print_tokens(tokenizer: &mut dyn Tokenizer<'_>) -> Result<(), String> {
    loop {
        match tokenizer.next_token().map_err(|e| e.to_string())? {
            Some(TokenKind::NotAvailable) | None => return Ok(()),
            Some(kind) => {
                let text = tokenizer.get_string().map_err(|e| e.to_string())?;

                println!("{kind} {}", text.unwrap_or_default());
            }
        }
    }
}

fn run(matches: &Matches) -> Result<(), String> {
    let path = matches.free.first().ok_or("Missing input file")?;
    let input = fs::read(path).map_err(|e| format!("{path}: {e}"))?;

    let format = match matches.opt_str("t") {
        Some(content_type) => content_type
            .parse::<DataFormat>()
            .map_err(|e| e.to_string())?,
        None => DataFormat::Json,
    };

    let chunk_size = matches
        .opt_get::<usize>("c")
        .map_err(|e| e.to_string())?
        .unwrap_or(input.len())
        .max(1);

    let mut tokenizer = format.tokenizer(&TokenizerSettings::default());

    for chunk in input.chunks(chunk_size) {
        tokenizer.feed_all(chunk).map_err(|e| e.to_string())?;
        print_tokens(&mut *tokenizer)?;
    }

    tokenizer.end_of_input();
    print_tokens(&mut *tokenizer)?;

    Ok(())
}

fn main() -> ExitCode {
    let Some(matches) = parse_options() else {
        return ExitCode::FAILURE;
    };

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
