//! Shell-style tokenizing and escaping
//!
//! Only the subset needed for `docker run` lines: whitespace splitting with
//! double, single and backtick quoting. No variable expansion, no globbing,
//! no operators.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{CaptureMatches, Regex};

/// One alternative per quoting style, then a plain run of non-whitespace.
/// Alternatives are tried in order at each position, so an unterminated
/// quote falls through to `word`.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?P<quoted>"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|`(?:[^`\\]|\\.)*`)|(?P<word>\S+)"#,
    )
    .expect("valid regex")
});

/// Values made only of these characters need no quoting
static SIMPLE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._/:=-]+$").expect("valid regex"));

const LINE_CONTINUATION: &str = "\\";

/// Lazy token iterator over one command line
pub struct Tokens<'a> {
    captures: CaptureMatches<'static, 'a>,
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let caps = self.captures.next()?;
            if let Some(quoted) = caps.name("quoted") {
                return Some(unquote(quoted.as_str()));
            }
            match caps.name("word").map(|word| word.as_str()) {
                // Line continuation of a multi-line paste
                Some(LINE_CONTINUATION) => continue,
                word => return word.map(String::from),
            }
        }
    }
}

/// Iterate over the tokens of `input`
pub fn tokens(input: &str) -> Tokens<'_> {
    Tokens {
        captures: TOKEN_RE.captures_iter(input),
    }
}

/// Split a command line into tokens
///
/// A quoted span becomes one token with its quotes stripped and escaped quote
/// characters unescaped. Quotes only group a whole word: in `FOO="a b"` the
/// quote opens mid-word, so it yields `FOO="a` and `b"`.
///
/// ```
/// use dockform_convert::shell::tokenize;
///
/// assert_eq!(tokenize(r#"a "b c" 'd e' f"#), vec!["a", "b c", "d e", "f"]);
/// ```
pub fn tokenize(input: &str) -> Vec<String> {
    tokens(input).collect()
}

fn unquote(span: &str) -> String {
    // The regex guarantees a matching quote character at both ends
    let inner = &span[1..span.len() - 1];
    inner
        .replace("\\\"", "\"")
        .replace("\\'", "'")
        .replace("\\`", "`")
}

/// Quote a value for a command line if it needs it
///
/// Values matching `[A-Za-z0-9._/:=-]+` are returned bare; anything else is
/// wrapped in double quotes with inner double quotes backslash-escaped.
pub fn escape(value: &str) -> Cow<'_, str> {
    if SIMPLE_WORD.is_match(value) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\\\"")))
    }
}

/// Escape every argument and join them with single spaces
pub fn join_escaped<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| escape(arg.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
