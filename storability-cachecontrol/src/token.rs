//! Tokenization of Cache-Control directive lists.
//!
//! [`tokenize`] scans a raw header value into a lazy sequence of [`Token`]s.
//! The scan is a single left-to-right pass over the input bytes and never
//! fails; every input byte is covered by exactly one token span.

use std::borrow::Cow;

/// Kind of a [`Token`] produced by [`tokenize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A single comma.
    Comma,
    /// A single equals sign.
    Equals,
    /// One or more spaces or control characters.
    Space,
    /// A text value, either a quoted-string or an unquoted run.
    Text,
}

/// A single token scanned from a Cache-Control directive list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Kind of the token.
    pub kind: TokenKind,
    /// Byte offset in the input where the token starts.
    pub start: usize,
    /// Byte offset in the input just past the end of the token.
    pub end: usize,
    /// Text of the token.
    ///
    /// For [`TokenKind::Text`] tokens scanned from a quoted string this is
    /// the unescaped content without the surrounding quotes. For
    /// [`TokenKind::Comma`] and [`TokenKind::Equals`] it is a single `","`
    /// or `"="`. For [`TokenKind::Space`] it is the verbatim run, control
    /// characters included.
    pub text: Cow<'a, str>,
}

/// Returns a lazy iterator of tokens over the given Cache-Control value.
///
/// Quoted strings yield a single [`TokenKind::Text`] token containing the
/// unquoted, unescaped text. A quoted string without a closing quote is not
/// treated as quoted at all: the opening quote becomes the first byte of an
/// ordinary unquoted run, so the broken value is recovered as literal text.
pub fn tokenize(input: &str) -> Tokenizer<'_> {
    Tokenizer { input, pos: 0 }
}

/// Iterator over the tokens of a Cache-Control value. Created by [`tokenize`].
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn single(&mut self, kind: TokenKind, text: &'static str) -> Token<'a> {
        let start = self.pos;
        self.pos += 1;
        Token {
            kind,
            start,
            end: self.pos,
            text: Cow::Borrowed(text),
        }
    }

    /// Attempts to read a quoted string opening at `start`. Returns `None`
    /// if no closing quote exists, leaving `pos` untouched so the caller can
    /// fall back to an unquoted run.
    fn scan_quoted(&mut self, start: usize) -> Option<Token<'a>> {
        let bytes = self.input.as_bytes();
        let mut escaped = false;
        let mut any_escape = false;

        let mut j = start + 1;
        while j < bytes.len() {
            if escaped {
                escaped = false;
            } else if bytes[j] == b'\\' {
                escaped = true;
                any_escape = true;
            } else if bytes[j] == b'"' {
                let raw = &self.input[start + 1..j];
                let text = if any_escape {
                    Cow::Owned(unescape(raw))
                } else {
                    Cow::Borrowed(raw)
                };

                self.pos = j + 1;
                return Some(Token {
                    kind: TokenKind::Text,
                    start,
                    end: j + 1,
                    text,
                });
            }
            j += 1;
        }

        None
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let bytes = self.input.as_bytes();
        let start = self.pos;

        let c = *bytes.get(start)?;

        if is_control_or_space(c) {
            let mut end = start + 1;
            while end < bytes.len() && is_control_or_space(bytes[end]) {
                end += 1;
            }
            self.pos = end;
            return Some(Token {
                kind: TokenKind::Space,
                start,
                end,
                text: Cow::Borrowed(&self.input[start..end]),
            });
        }

        match c {
            b',' => return Some(self.single(TokenKind::Comma, ",")),
            b'=' => return Some(self.single(TokenKind::Equals, "=")),
            b'"' => {
                if let Some(token) = self.scan_quoted(start) {
                    return Some(token);
                }
                // No closing quote: fall through and read the quote as the
                // start of an ordinary unquoted run.
            }
            _ => {}
        }

        // Unquoted run. A quote is only special at the start of a run; inside
        // a run it is plain data, as are backslashes.
        let mut end = start + 1;
        while end < bytes.len() && !ends_run(bytes[end]) {
            end += 1;
        }
        self.pos = end;

        Some(Token {
            kind: TokenKind::Text,
            start,
            end,
            text: Cow::Borrowed(&self.input[start..end]),
        })
    }
}

/// Removes quoted-pair escaping: a `\` followed by any character yields only
/// that character. A trailing lone `\` is dropped.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut escaped = false;

    for c in raw.chars() {
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else {
            out.push(c);
        }
    }

    out
}

fn is_control_or_space(c: u8) -> bool {
    c <= b' ' || c == 0x7f
}

fn ends_run(c: u8) -> bool {
    is_control_or_space(c) || c == b',' || c == b'='
}
