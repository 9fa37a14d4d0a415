use std::env;
use std::process;

use crate::format::FormatKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub language: Option<String>,
    pub format: FormatKind,
    pub prefix: String,
    pub strict: bool,
    pub lexer: Option<String>,
    pub files: Vec<String>,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            language: None,
            format: FormatKind::Html,
            prefix: String::new(),
            strict: false,
            lexer: None,
            files: Vec::new(),
        }
    }
}

/// Result of parsing the command line.
#[derive(Debug, PartialEq)]
pub enum Parsed {
    Run(Args),
    Help,
    Version,
}

/// Parse `std::env::args`, printing usage and exiting on bad input.
pub fn parse_args() -> Args {
    let args: Vec<String> = env::args().skip(1).collect();
    match parse_from(&args) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help) => {
            print_usage();
            process::exit(0);
        }
        Ok(Parsed::Version) => {
            println!("pygmentize-rs {}", env!("CARGO_PKG_VERSION"));
            process::exit(0);
        }
        Err(msg) => {
            eprintln!("pygmentize-rs: {}", msg);
            eprintln!("Try 'pygmentize-rs --help' for usage.");
            process::exit(2);
        }
    }
}

pub fn parse_from(args: &[String]) -> Result<Parsed, String> {
    let mut out = Args::default();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];

        if arg == "--" {
            out.files.extend(args[i + 1..].iter().cloned());
            break;
        }

        if arg == "-l" {
            out.language = Some(value(args, &mut i, "-l")?);
        } else if let Some(lang) = arg.strip_prefix("-l").filter(|s| !s.is_empty()) {
            out.language = Some(lang.to_string());
        } else if arg == "-f" {
            out.format = value(args, &mut i, "-f")?.parse()?;
        } else if let Some(fmt) = arg.strip_prefix("-f").filter(|s| !s.is_empty()) {
            out.format = fmt.parse()?;
        } else if arg == "-P" || arg == "--prefix" {
            out.prefix = value(args, &mut i, arg)?;
        } else if let Some(prefix) = arg.strip_prefix("--prefix=") {
            out.prefix = prefix.to_string();
        } else if arg == "--lexer" {
            out.lexer = Some(value(args, &mut i, "--lexer")?);
        } else if let Some(lexer) = arg.strip_prefix("--lexer=") {
            out.lexer = Some(lexer.to_string());
        } else if arg == "--strict" {
            out.strict = true;
        } else if arg == "-h" || arg == "--help" {
            return Ok(Parsed::Help);
        } else if arg == "--version" {
            return Ok(Parsed::Version);
        } else if arg.starts_with('-') && arg.len() > 1 {
            return Err(format!("unknown option: {}", arg));
        } else {
            out.files.push(arg.clone());
        }

        i += 1;
    }

    if out.format != FormatKind::Html && (out.strict || !out.prefix.is_empty()) {
        return Err("--strict and -P only apply to -f html".to_string());
    }

    Ok(Parsed::Run(out))
}

fn value(args: &[String], i: &mut usize, flag: &str) -> Result<String, String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("{} requires an argument", flag))
}

fn print_usage() {
    eprintln!(
        "pygmentize-rs {} — highlight source through the Pygments raw token stream",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!("Usage: pygmentize-rs [options] [file ...]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -l lang          Lexer alias (go, php, js, ...); guessed when omitted");
    eprintln!("  -f format        Output format: html (default), debug, raw");
    eprintln!("  -P, --prefix p   Prefix for every emitted class name (html only)");
    eprintln!("  --strict         Fail on token types without a class (html only)");
    eprintln!("  --lexer path     Lexer binary (default: $PYGMENTIZE_BIN or pygmentize)");
    eprintln!("  -h, --help       Show this help");
    eprintln!("  --version        Show version");
    eprintln!();
    eprintln!("  Reads stdin when no files are given; '-' also means stdin.");
    eprintln!("  Set PYGMENTIZE_LOG=debug to trace lexer invocations on stderr.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  pygmentize-rs -l go main.go > main.html");
    eprintln!("  echo 'fmt.Println(1)' | pygmentize-rs -l go -f debug");
}
