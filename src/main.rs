use std::{env, fs::read_to_string, io::Write, path::PathBuf, process::exit, time::Instant};

use idio_lexer::{
    errors::errors::{Error, ErrorImpl, ErrorTip},
    LexerRegistry,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: idio-lex [--lexer <alias>] <file>";

struct Args {
    lexer: Option<String>,
    file: PathBuf,
}

fn parse_args() -> Option<Args> {
    let mut lexer = None;
    let mut file = None;
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-l" | "--lexer" => lexer = Some(args.next()?),
            _ if file.is_none() => file = Some(PathBuf::from(arg)),
            _ => return None,
        }
    }

    Some(Args { lexer, file: file? })
}

fn run(args: Args) -> Result<(), Error> {
    let registry = LexerRegistry::with_defaults();
    let lexer = match &args.lexer {
        Some(alias) => registry.by_alias(alias)?,
        None => registry.for_filename(&args.file)?,
    };

    let source = read_to_string(&args.file).map_err(|error| {
        Error::new(ErrorImpl::Io {
            path: args.file.to_string_lossy().into_owned(),
            message: error.to_string(),
        })
    })?;

    let start = Instant::now();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut count = 0;

    for token in lexer.tokens(&source) {
        // a closed pipe just ends the listing
        if writeln!(out, "{}", token).is_err() {
            break;
        }
        count += 1;
    }

    info!(lexer = lexer.name(), tokens = count, elapsed = ?start.elapsed(), "lexed");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("IDIO_LEX_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = parse_args() else {
        eprintln!("{}", USAGE);
        exit(2);
    };

    if let Err(error) = run(args) {
        if let ErrorTip::None = error.get_tip() {
            eprintln!("Error: {} ({})", error.get_error_name(), error);
        } else {
            eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
        }
        exit(1);
    }
}
