//! Shell-style word splitting for curl commands
//!
//! Follows POSIX shell quoting closely enough for "Copy as cURL" output:
//! single quotes, double quotes, backslash escapes, `\`-newline continuations
//! and bash ANSI-C quoting (`$'...'`).

use std::iter::Peekable;
use std::str::Chars;

use crate::errors::{FetchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
    AnsiC,
}

/// Split a command line into words
pub fn tokenize(cmd: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // Distinguishes an empty quoted word ('') from no word at all
    let mut in_token = false;
    let mut quote = Quote::None;
    let mut chars = cmd.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => {
                if c == '\'' {
                    quote = Quote::None;
                } else {
                    current.push(c);
                }
            }
            Quote::AnsiC => match c {
                '\'' => quote = Quote::None,
                '\\' => push_ansi_escape(&mut chars, &mut current),
                _ => current.push(c),
            },
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' => match chars.peek().copied() {
                    Some('\n') => {
                        chars.next();
                    }
                    Some(next @ ('"' | '\\' | '$' | '`')) => {
                        chars.next();
                        current.push(next);
                    }
                    _ => current.push('\\'),
                },
                _ => current.push(c),
            },
            Quote::None => match c {
                '\\' => match chars.next() {
                    // line continuation
                    Some('\n') => {}
                    Some('\r') if chars.peek() == Some(&'\n') => {
                        chars.next();
                    }
                    Some(next) => {
                        current.push(next);
                        in_token = true;
                    }
                    None => {}
                },
                '\'' => {
                    quote = Quote::Single;
                    in_token = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_token = true;
                }
                '$' if chars.peek() == Some(&'\'') => {
                    chars.next();
                    quote = Quote::AnsiC;
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                _ => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if quote != Quote::None {
        return Err(FetchError::MalformedCommand(
            "Unterminated quote in curl command".to_string(),
        ));
    }

    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Decode one backslash escape inside `$'...'`
fn push_ansi_escape(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    let Some(c) = chars.next() else {
        out.push('\\');
        return;
    };

    match c {
        'n' => out.push('\n'),
        't' => out.push('\t'),
        'r' => out.push('\r'),
        'a' => out.push('\x07'),
        'b' => out.push('\x08'),
        'e' | 'E' => out.push('\x1b'),
        'f' => out.push('\x0c'),
        'v' => out.push('\x0b'),
        '\\' | '\'' | '"' | '?' => out.push(c),
        'x' => push_code_point(chars, out, 16, 2, "\\x"),
        'u' => push_code_point(chars, out, 16, 4, "\\u"),
        'U' => push_code_point(chars, out, 16, 8, "\\U"),
        '0'..='7' => {
            let mut value = c.to_digit(8).unwrap_or(0);
            for _ in 0..2 {
                match chars.peek().and_then(|d| d.to_digit(8)) {
                    Some(d) => {
                        value = value * 8 + d;
                        chars.next();
                    }
                    None => break,
                }
            }
            if let Some(ch) = char::from_u32(value) {
                out.push(ch);
            }
        }
        other => {
            out.push('\\');
            out.push(other);
        }
    }
}

/// Read up to `max` digits in `radix` and push the resulting character
///
/// With no digits, the escape is kept literally.
fn push_code_point(
    chars: &mut Peekable<Chars<'_>>,
    out: &mut String,
    radix: u32,
    max: usize,
    literal: &str,
) {
    let mut value: u32 = 0;
    let mut read = 0;
    while read < max {
        match chars.peek().and_then(|d| d.to_digit(radix)) {
            Some(d) => {
                value = value * radix + d;
                chars.next();
                read += 1;
            }
            None => break,
        }
    }

    if read == 0 {
        out.push_str(literal);
    } else if let Some(ch) = char::from_u32(value) {
        out.push(ch);
    }
}
