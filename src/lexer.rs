//! Run the external lexer and push its token stream through a formatter.
//!
//! One run is one child process. The source text is written to its stdin
//! from a scoped thread while the calling thread decodes stdout, so neither
//! side can stall on a full pipe. A third thread collects stderr for error
//! reporting. The exit status is checked only after stdout is drained.

use std::env;
use std::io::{self, BufReader, Read, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::LazyLock;
use std::thread;

use log::{debug, trace};
use regex::Regex;

use crate::decode::{Decoded, TokenStream};
use crate::error::HighlightError;
use crate::format::Formatter;
use crate::token::Token;

/// Environment variable naming the lexer binary.
pub const LEXER_ENV: &str = "PYGMENTIZE_BIN";

const DEFAULT_PROGRAM: &str = "pygmentize";

static LANGUAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_+#.-]*$").expect("language pattern is valid"));

/// How to invoke the lexer. The language selector, when given, is appended
/// as `-l <name>` after the configured arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerCommand {
    program: String,
    args: Vec<String>,
}

impl Default for LexerCommand {
    fn default() -> Self {
        Self::pygmentize()
    }
}

impl LexerCommand {
    /// `pygmentize -f raw`.
    #[must_use]
    pub fn pygmentize() -> Self {
        Self::new(DEFAULT_PROGRAM).args(["-f", "raw"])
    }

    /// Like [`pygmentize`](Self::pygmentize), with the binary taken from
    /// `PYGMENTIZE_BIN` when set.
    #[must_use]
    pub fn from_env() -> Self {
        match env::var(LEXER_ENV) {
            Ok(bin) if !bin.trim().is_empty() => Self::new(bin.trim()).args(["-f", "raw"]),
            _ => Self::pygmentize(),
        }
    }

    /// A bare command with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        LexerCommand { program: program.into(), args: Vec::new() }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, language: Option<&str>) -> Result<Command, HighlightError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(lang) = language {
            if !LANGUAGE_NAME.is_match(lang) {
                return Err(HighlightError::InvalidLanguage(lang.to_string()));
            }
            cmd.arg("-l").arg(lang);
        }
        cmd.stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::piped());
        Ok(cmd)
    }

    /// Highlight `code` as `language`, or let the lexer guess when `None`.
    pub fn highlight<F>(&self, code: &str, language: Option<&str>, formatter: &F) -> Result<String, HighlightError>
    where
        F: Formatter + ?Sized,
    {
        let mut out = String::with_capacity(code.len() * 2);
        self.run(code, language, |token, text| {
            out.push_str(&formatter.format(&token, &text)?);
            Ok(())
        })?;
        Ok(out)
    }

    /// The decoded token stream for `code`, without formatting.
    pub fn tokens(&self, code: &str, language: Option<&str>) -> Result<Vec<Decoded>, HighlightError> {
        let mut tokens = Vec::new();
        self.run(code, language, |token, text| {
            tokens.push((token, text));
            Ok(())
        })?;
        Ok(tokens)
    }

    fn run<S>(&self, code: &str, language: Option<&str>, mut sink: S) -> Result<(), HighlightError>
    where
        S: FnMut(Token, String) -> Result<(), HighlightError>,
    {
        let mut cmd = self.command(language)?;
        debug!("spawning {} {:?} (language: {:?})", self.program, self.args, language);
        let mut child = cmd
            .spawn()
            .map_err(|source| HighlightError::Spawn { program: self.program.clone(), source })?;

        let (Some(stdin), Some(stdout), Some(mut stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            reap(&mut child);
            return Err(HighlightError::Io(io::Error::other("lexer pipes unavailable")));
        };

        let (decoded, fed, diagnostics) = thread::scope(|scope| {
            let writer = scope.spawn(move || feed(stdin, code));
            let drain = scope.spawn(move || {
                let mut text = String::new();
                stderr.read_to_string(&mut text).map(|_| text)
            });

            let mut stream = TokenStream::new(BufReader::new(stdout));
            let mut count = 0usize;
            let mut decoded = Ok(());
            for record in stream.by_ref() {
                match record.and_then(|(token, text)| sink(token, text)) {
                    Ok(()) => count += 1,
                    Err(e) => {
                        decoded = Err(e);
                        break;
                    }
                }
            }
            if decoded.is_err() {
                // stop the lexer so the writer and stderr threads see closed pipes
                let _ = child.kill();
            }
            trace!("decoded {} tokens from {} lines", count, stream.lines_read());
            drop(stream);

            let fed = writer.join().unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            let diagnostics = drain.join().ok().and_then(Result::ok).unwrap_or_default();
            (decoded, fed, diagnostics)
        });

        let status = child.wait()?;
        decoded?;
        debug!("{} exited with {}", self.program, status);
        if !status.success() {
            return Err(HighlightError::LexerExit { code: status.code(), stderr: diagnostics });
        }
        fed?;
        Ok(())
    }
}

/// Write all of `code` to the lexer and close its stdin. A lexer that exits
/// without reading everything is judged by its exit status, not by the
/// broken pipe.
fn feed(mut stdin: ChildStdin, code: &str) -> io::Result<()> {
    match stdin.write_all(code.as_bytes()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Highlight `code` with the lexer from [`LexerCommand::from_env`], letting
/// it guess the language.
pub fn highlight<F>(code: &str, formatter: &F) -> Result<String, HighlightError>
where
    F: Formatter + ?Sized,
{
    LexerCommand::from_env().highlight(code, None, formatter)
}

/// Highlight `code` as `language` (a lexer alias such as `go` or `php`).
pub fn highlight_language<F>(code: &str, language: &str, formatter: &F) -> Result<String, HighlightError>
where
    F: Formatter + ?Sized,
{
    LexerCommand::from_env().highlight(code, Some(language), formatter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_command_is_raw_pygmentize() {
        let cmd = LexerCommand::pygmentize();
        assert_eq!(cmd.program(), "pygmentize");
        assert_eq!(cmd.args, ["-f", "raw"]);
    }

    #[test]
    fn language_names() {
        for ok in ["go", "php", "c++", "c#", "html+php", "objective-c", "python3", "ca65"] {
            assert!(LANGUAGE_NAME.is_match(ok), "{}", ok);
        }
        for bad in ["", "-O", "go lang", "../x", "a;b"] {
            assert!(!LANGUAGE_NAME.is_match(bad), "{}", bad);
        }
    }

    #[test]
    fn invalid_language_is_rejected_before_spawn() {
        let cmd = LexerCommand::new("/nonexistent/lexer");
        match cmd.highlight("x", Some("-O"), &crate::format::RawFormatter) {
            Err(HighlightError::InvalidLanguage(name)) => assert_eq!(name, "-O"),
            other => panic!("expected invalid language, got {:?}", other),
        }
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let cmd = LexerCommand::new("/nonexistent/lexer");
        match cmd.tokens("x", None) {
            Err(HighlightError::Spawn { program, source }) => {
                assert_eq!(program, "/nonexistent/lexer");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected spawn error, got {:?}", other),
        }
    }
}
