//! Cookie utilities
//!
//! Rewriting of the short-form `-b`/`--cookie` flag into a `Cookie:` header
//! declaration, and splitting of `Cookie` header values into name/value pairs.

use cookie::Cookie;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `-b` or `--cookie`, optional `=`, then a single- or double-quoted value.
///
/// The value stops at the first matching quote on the same line; escaped
/// quotes are not recognised.
static COOKIE_FLAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(-b|--cookie)\s*=?\s*(?:'([^'\n]*)'|"([^"\n]*)")"#)
        .expect("cookie flag pattern is valid")
});

/// Rewrite `-b 'v'` / `--cookie="v"` into `-H 'Cookie: v'`, keeping the quote style.
///
/// ```
/// use curlfetch::cookies::convert_cookie_format;
///
/// let cmd = "curl 'http://example.com' -b 'session=abc123'";
/// assert_eq!(
///     convert_cookie_format(cmd),
///     "curl 'http://example.com' -H 'Cookie: session=abc123'"
/// );
/// ```
pub fn convert_cookie_format(curl_command: &str) -> String {
    COOKIE_FLAG_RE
        .replace_all(curl_command, |caps: &Captures| {
            let (quote, value) = match (caps.get(2), caps.get(3)) {
                (Some(single), _) => ('\'', single.as_str()),
                (None, Some(double)) => ('"', double.as_str()),
                (None, None) => unreachable!("one quote alternative always matches"),
            };
            format!("-H {quote}Cookie: {value}{quote}")
        })
        .into_owned()
}

/// Check whether a header name denotes the request cookie header
///
/// A leading `$` is ignored so that names produced by ANSI-C quoting still match.
pub fn is_cookie_header(name: &str) -> bool {
    name.trim().trim_start_matches('$').eq_ignore_ascii_case("cookie")
}

/// Split a `Cookie` header value (`a=1; b=2`) into ordered pairs
///
/// Unparseable fragments are skipped; a later duplicate name wins.
pub fn parse_cookie_header(value: &str) -> IndexMap<String, String> {
    Cookie::split_parse(value.trim())
        .filter_map(|c| c.ok())
        .map(|c| (c.name().to_string(), c.value_trimmed().to_string()))
        .collect()
}

/// Join cookie pairs back into a single `Cookie` header value
pub fn cookie_header_value(cookies: &IndexMap<String, String>) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }
    Some(
        cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; "),
    )
}
