//! Decoder for the lexer's raw token stream.
//!
//! Each line is `<path>\t<value>`: `path` is a dotted token type whose first
//! segment is the protocol prefix (`Token`), and `value` is a quoted literal
//! with backslash escapes, e.g.
//!
//! ```text
//! Token.Literal.String.Double	'"hello\nworld"'
//! ```

use std::io::{self, BufRead};

use crate::error::{DecodeErrorKind, HighlightError};
use crate::token::Token;

/// One decoded record: the token type and its original text.
pub type Decoded = (Token, String);

/// Decode a quoted value into the text it stands for.
///
/// Exactly one delimiter character is stripped from each end (a legacy `u`
/// prefix is tolerated). Slicing is byte-based: escapes are pure ASCII, so
/// everything between them is copied through untouched, multi-byte
/// characters included.
pub fn decode_value(raw: &str) -> Result<String, HighlightError> {
    let (start, body) = unquote(raw).ok_or_else(|| HighlightError::decode(DecodeErrorKind::MalformedLine, raw, 0))?;
    let bytes = body.as_bytes();
    let mut out = String::with_capacity(body.len());
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        out.push_str(&body[run_start..i]);
        let Some(&next) = bytes.get(i + 1) else {
            return Err(HighlightError::decode(DecodeErrorKind::MalformedEscape, raw, start + i));
        };
        let consumed = match next {
            b'n' => {
                out.push('\n');
                2
            }
            b't' => {
                out.push('\t');
                2
            }
            b'r' => {
                out.push('\r');
                2
            }
            b'\\' | b'\'' | b'"' => {
                out.push(next as char);
                2
            }
            b'x' | b'u' | b'U' => {
                let digits = match next {
                    b'x' => 2,
                    b'u' => 4,
                    _ => 8,
                };
                if !push_hex(&mut out, body.get(i + 2..i + 2 + digits)) {
                    return Err(HighlightError::decode(DecodeErrorKind::MalformedEscape, raw, start + i));
                }
                2 + digits
            }
            _ => {
                let c = body[i + 1..].chars().next().unwrap_or('\\');
                return Err(HighlightError::decode(DecodeErrorKind::UnknownEscape(c), raw, start + i));
            }
        };
        i += consumed;
        run_start = i;
    }
    out.push_str(&body[run_start..]);
    Ok(out)
}

/// Append the character named by `hex`. `None` (the digits ran past the
/// end or into a multi-byte character) and bad digits both fail.
fn push_hex(out: &mut String, hex: Option<&str>) -> bool {
    let ch = hex
        .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
        .and_then(char::from_u32);
    match ch {
        Some(c) => {
            out.push(c);
            true
        }
        None => false,
    }
}

/// Strip the quote pair, returning the body and its byte offset in `raw`.
fn unquote(raw: &str) -> Option<(usize, &str)> {
    let (skip, quoted) = match raw.strip_prefix('u').filter(|r| r.len() >= 2) {
        Some(rest) => (1, rest),
        None => (0, raw),
    };
    let mut chars = quoted.chars();
    let open = chars.next()?;
    chars.next_back()?;
    Some((skip + open.len_utf8(), chars.as_str()))
}

/// Parse one raw line (terminator already removed).
///
/// Returns `Ok(None)` for zero-length tokens: an empty value field or an
/// empty quote pair.
pub fn parse_line(line: &str) -> Result<Option<Decoded>, HighlightError> {
    let Some((path, value)) = line.split_once('\t') else {
        return Err(HighlightError::decode(DecodeErrorKind::MalformedLine, line, line.len()));
    };
    let Some((prefix, path)) = path.split_once('.') else {
        return Err(HighlightError::decode(DecodeErrorKind::MalformedLine, line, 0));
    };
    if path.is_empty() {
        return Err(HighlightError::decode(DecodeErrorKind::MalformedLine, line, prefix.len() + 1));
    }
    match unquote(value) {
        _ if value.is_empty() => return Ok(None),
        Some((_, "")) => return Ok(None),
        Some(_) => {}
        None => return Err(HighlightError::decode(DecodeErrorKind::MalformedLine, value, 0)),
    }
    let text = decode_value(value)?;
    Ok(Some((Token::from_path(path), text)))
}

/// Lazy sequence of decoded records read from a raw token stream.
///
/// Reads one line at a time into a reused buffer, so records are available
/// as soon as the lexer writes them. The stream ends at EOF or after the
/// first error.
pub struct TokenStream<R> {
    reader: R,
    buf: String,
    line: usize,
    done: bool,
}

impl<R: BufRead> TokenStream<R> {
    pub fn new(reader: R) -> Self {
        TokenStream { reader, buf: String::with_capacity(256), line: 0, done: false }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line
    }

    fn next_line(&mut self) -> io::Result<bool> {
        self.buf.clear();
        let bytes = self.reader.read_line(&mut self.buf)?;
        if bytes == 0 {
            return Ok(false);
        }
        if self.buf.ends_with('\n') {
            self.buf.pop();
            if self.buf.ends_with('\r') {
                self.buf.pop();
            }
        }
        self.line += 1;
        Ok(true)
    }
}

impl<R: BufRead> Iterator for TokenStream<R> {
    type Item = Result<Decoded, HighlightError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.next_line() {
                Ok(false) => self.done = true,
                Ok(true) => match parse_line(&self.buf) {
                    Ok(Some(record)) => return Some(Ok(record)),
                    Ok(None) => continue,
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e.at_line(self.line)));
                    }
                },
                Err(e) => {
                    self.done = true;
                    return Some(Err(HighlightError::Io(e)));
                }
            }
        }
        None
    }
}

/// Decode a whole stream, failing on the first bad line.
pub fn decode_all<R: BufRead>(reader: R) -> Result<Vec<Decoded>, HighlightError> {
    TokenStream::new(reader).collect()
}
