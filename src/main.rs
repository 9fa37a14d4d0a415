use std::fs;
use std::io::{self, Read, Write};
use std::process;

use thiserror::Error;

use pygmentize::cli::{self, Args};
use pygmentize::format::{DebugFormatter, FormatKind, Formatter, HtmlFormatter, RawFormatter};
use pygmentize::{HighlightError, LexerCommand, logging};

/// Failures of the tool itself, kept apart from lexer failures so a bad
/// input path is not reported as a lexer problem.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Highlight(#[from] HighlightError),

    #[error("cannot read {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot write output: {0}")]
    Output(#[source] io::Error),
}

fn formatter(args: &Args) -> Box<dyn Formatter> {
    match args.format {
        FormatKind::Html => Box::new(
            HtmlFormatter::new()
                .with_prefix(args.prefix.clone())
                .strict(args.strict),
        ),
        FormatKind::Debug => Box::new(DebugFormatter),
        FormatKind::Raw => Box::new(RawFormatter),
    }
}

fn read_source(path: &str) -> Result<String, CliError> {
    let read = if path == "-" {
        let mut s = String::new();
        io::stdin().lock().read_to_string(&mut s).map(|_| s)
    } else {
        fs::read_to_string(path)
    };
    read.map_err(|source| CliError::Input { path: path.to_string(), source })
}

fn run(args: &Args) -> Result<(), CliError> {
    let lexer = match &args.lexer {
        Some(bin) => LexerCommand::new(bin.as_str()).args(["-f", "raw"]),
        None => LexerCommand::from_env(),
    };
    let formatter = formatter(args);
    let stdin_only = ["-".to_string()];
    let files: &[String] = if args.files.is_empty() { &stdin_only } else { &args.files };

    let mut stdout = io::stdout().lock();
    for path in files {
        let code = read_source(path)?;
        let out = lexer.highlight(&code, args.language.as_deref(), &formatter)?;
        stdout.write_all(out.as_bytes()).map_err(CliError::Output)?;
    }
    stdout.flush().map_err(CliError::Output)?;
    Ok(())
}

fn main() {
    logging::init();
    let args = cli::parse_args();
    if let Err(e) = run(&args) {
        eprintln!("pygmentize-rs: {}", e);
        process::exit(1);
    }
}
