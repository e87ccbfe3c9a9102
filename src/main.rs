// rdtree: recursive-descent parse tree builder

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use clap::Parser as _;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use rdtree::parser::{Lexer, ParseError, Parser};

/// Exit status for rejected input.
const REJECTED: u8 = 1;

/// Stack for the parser thread. Every nested `(`, `{` or unary operator costs
/// a handful of frames.
const PARSER_STACK_BYTES: usize = 512 * 1024 * 1024;

fn main() -> anyhow::Result<ExitCode> {
    initialize_logging();

    let cli = Cli::parse();
    let source = read_source(cli.input.as_ref())?;
    debug!(bytes = source.len(), "Read input");

    let tokens = Lexer::new(&source).tokenize();
    if cli.emit == Emit::Tokens {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(ExitCode::SUCCESS);
    }

    let emit = cli.emit;
    thread::Builder::new()
        .name("parser".to_string())
        .stack_size(PARSER_STACK_BYTES)
        .spawn(move || parse_and_emit(Parser::from_tokens(tokens), emit))?
        .join()
        .map_err(|_| anyhow::anyhow!("parser thread panicked"))?
}

fn parse_and_emit(mut parser: Parser, emit: Emit) -> anyhow::Result<ExitCode> {
    let tree = match parser.parse_program() {
        Ok(tree) => tree,
        Err(err) => {
            report(&err);
            return Ok(ExitCode::from(REJECTED));
        }
    };
    info!(nodes = tree.size(), "Parse tree built");

    if emit == Emit::Json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        println!("String accepted");
        print!("{tree}");
    }

    Ok(ExitCode::SUCCESS)
}

fn read_source(input: Option<&PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn report(err: &ParseError) {
    match err {
        ParseError::UnexpectedToken {
            expected,
            found,
            lexeme,
            line,
        } => {
            eprintln!("Token rejected line {line}.");
            eprintln!("Got : {found} with lexeme '{lexeme}'");
            eprintln!("Was expecting : {expected}");
        }
    }
}

fn initialize_logging() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();
}

/// Parse a program and print its concrete parse tree.
#[derive(clap::Parser)]
#[command(name = "rdtree", version)]
struct Cli {
    /// Source file to parse (reads standard input when omitted)
    input: Option<PathBuf>,

    /// What to print on success
    #[arg(long, value_enum, default_value = "tree")]
    emit: Emit,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Emit {
    /// Verdict line followed by the indented parse tree
    Tree,
    /// Parse tree as JSON
    Json,
    /// Token stream as JSON, without parsing
    Tokens,
}
