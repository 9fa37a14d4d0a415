//! Syntax highlighting by way of an external lexer's raw token stream.
//!
//! The lexer (Pygments' `pygmentize -f raw` by default) does the lexing;
//! this crate decodes its line protocol back into `(Token, text)` pairs and
//! renders them with a [`Formatter`](format::Formatter).
//!
//! ```no_run
//! use pygmentize::format::HtmlFormatter;
//!
//! let out = pygmentize::highlight_language(r#"fmt.Println("hello world")"#, "go", &HtmlFormatter::new())?;
//! // <span class="n no">fmt</span><span class="p">.</span>...
//! # Ok::<(), pygmentize::HighlightError>(())
//! ```

pub mod cli;
pub mod decode;
pub mod error;
pub mod format;
pub mod lexer;
pub mod logging;
pub mod token;

pub use error::{DecodeErrorKind, HighlightError};
pub use lexer::{LexerCommand, highlight, highlight_language};
pub use token::Token;
