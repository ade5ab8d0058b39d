//! cURL command parsing
//!
//! Turns the words of a curl command into a [`ParsedRequest`].

use indexmap::IndexMap;
use tracing::{debug, warn};
use url::Url;

use super::tokenizer::tokenize;
use crate::cookies::{is_cookie_header, parse_cookie_header};
use crate::errors::{FetchError, Result};
use crate::request::ParsedRequest;

/// Short flags that take a value
const SHORT_FLAGS_WITH_ARGS: &[char] = &[
    'X', 'H', 'd', 'b', 'u', 'x', 'A', 'e', 'o', 'c', 'm', 'E', 'T', 'w', 'r', 'F', 'U', 'y', 'Y', 'z',
];

/// Long flags known to take no value
const LONG_FLAGS_WITHOUT_ARGS: &[&str] = &[
    "--compressed",
    "--insecure",
    "--silent",
    "--show-error",
    "--location",
    "--location-trusted",
    "--verbose",
    "--include",
    "--fail",
    "--globoff",
    "--head",
    "--get",
    "--http1.0",
    "--http1.1",
    "--http2",
    "--http2-prior-knowledge",
    "--http3",
    "--no-buffer",
    "--progress-bar",
    "--tr-encoding",
    "--ipv4",
    "--ipv6",
    "--tlsv1.2",
    "--tlsv1.3",
];

/// Parse a curl command string into request parameters
pub fn parse_curl_command(cmd: &str) -> Result<ParsedRequest> {
    let tokens = tokenize(cmd)?;
    parse_tokens(&tokens)
}

/// Accumulated state while walking the tokens
#[derive(Debug, Default)]
struct CurlArgs {
    method: Option<String>,
    url: Option<String>,
    headers: IndexMap<String, String>,
    cookies: IndexMap<String, String>,
    data: Option<String>,
    get: bool,
    insecure: bool,
    user: Option<String>,
    proxy: Option<String>,
}

impl CurlArgs {
    fn push_data(&mut self, data: &str) {
        match &mut self.data {
            Some(existing) => {
                existing.push('&');
                existing.push_str(data);
            }
            None => self.data = Some(data.to_string()),
        }
    }

    fn push_header(&mut self, raw: &str) {
        let Some((name, value)) = parse_header(raw) else {
            debug!(header = raw, "Ignoring header without a colon");
            return;
        };

        if is_cookie_header(&name) {
            self.cookies.extend(parse_cookie_header(&value));
        } else {
            self.headers.insert(name, value);
        }
    }

    fn into_request(self) -> Result<ParsedRequest> {
        let raw_url = self
            .url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| FetchError::MalformedCommand("No URL found in curl command".to_string()))?;

        let mut url = normalize_url(&raw_url)?;
        let mut body = self.data;

        let method = if self.get {
            // -G moves the data into the query string
            if let Some(data) = body.take() {
                let query = match url.query() {
                    Some(q) if !q.is_empty() => format!("{}&{}", q, data),
                    _ => data,
                };
                url.set_query(Some(&query));
            }
            self.method.unwrap_or_else(|| "GET".to_string())
        } else {
            match (self.method, &body) {
                (Some(method), _) => method,
                (None, Some(_)) => "POST".to_string(),
                (None, None) => "GET".to_string(),
            }
        };

        Ok(ParsedRequest::new(url.to_string())
            .with_method(method)
            .with_headers(self.headers)
            .with_cookies(self.cookies)
            .with_body(body)
            .with_insecure(self.insecure)
            .with_basic_auth(self.user)
            .with_proxy(self.proxy))
    }
}

/// Parse tokenized curl command
fn parse_tokens(tokens: &[String]) -> Result<ParsedRequest> {
    if tokens.is_empty() {
        return Err(FetchError::MalformedCommand("Empty curl command".to_string()));
    }

    if !is_curl_program(&tokens[0]) {
        return Err(FetchError::MalformedCommand(format!(
            "Expected a curl command, found '{}'",
            tokens[0]
        )));
    }

    let mut args = CurlArgs::default();
    let mut i = 1;

    while i < tokens.len() {
        let token = tokens[i].as_str();

        if token.len() > 1 && token.starts_with('-') {
            let (flag, inline_value) = split_flag(token);

            // Combined boolean short flags like -sSLk
            if inline_value.is_none() && !flag.starts_with("--") && flag.len() > 2 {
                for c in flag[1..].chars() {
                    apply_switch(&mut args, c);
                }
                i += 1;
                continue;
            }

            let takes_value = flag_takes_value(flag, tokens.get(i + 1).map(String::as_str));
            let value = match inline_value {
                Some(v) => Some(v),
                None if takes_value => {
                    i += 1;
                    tokens.get(i).cloned()
                }
                None => None,
            };

            apply_flag(&mut args, flag, value)?;
        } else if args.url.is_none() {
            // URL (first non-flag argument)
            args.url = Some(token.to_string());
        } else {
            debug!(argument = token, "Ignoring extra positional argument");
        }

        i += 1;
    }

    args.into_request()
}

/// `curl`, `curl.exe` or a path to either
fn is_curl_program(token: &str) -> bool {
    let name = token.rsplit(['/', '\\']).next().unwrap_or(token);
    name.eq_ignore_ascii_case("curl") || name.eq_ignore_ascii_case("curl.exe")
}

/// Split `--flag=value` and `-Xvalue` into flag and inline value
fn split_flag(token: &str) -> (&str, Option<String>) {
    if let Some(rest) = token.strip_prefix("--") {
        if let Some((name, value)) = rest.split_once('=') {
            return (&token[..name.len() + 2], Some(value.to_string()));
        }
        return (token, None);
    }

    let mut chars = token[1..].chars();
    match chars.next() {
        Some(c) if SHORT_FLAGS_WITH_ARGS.contains(&c) && token.len() > 2 => {
            let split = 1 + c.len_utf8();
            (&token[..split], Some(token[split..].to_string()))
        }
        _ => (token, None),
    }
}

/// Decide whether a flag consumes the following token
fn flag_takes_value(flag: &str, next: Option<&str>) -> bool {
    match flag {
        "-X" | "--request" | "-H" | "--header" | "-d" | "--data" | "--data-ascii"
        | "--data-raw" | "--data-binary" | "--data-urlencode" | "-b" | "--cookie" | "-u"
        | "--user" | "-x" | "--proxy" | "-A" | "--user-agent" | "-e" | "--referer"
        | "--url" => true,
        f if LONG_FLAGS_WITHOUT_ARGS.contains(&f) => false,
        f if f.starts_with("--") => {
            // Unknown long option: assume it takes the next word unless that
            // word is another flag or looks like the URL.
            matches!(next, Some(n) if !n.starts_with('-') && !n.contains("://"))
        }
        f => f
            .chars()
            .nth(1)
            .is_some_and(|c| SHORT_FLAGS_WITH_ARGS.contains(&c)),
    }
}

/// Apply a single-letter switch that takes no value
fn apply_switch(args: &mut CurlArgs, c: char) {
    match c {
        'k' => args.insecure = true,
        'G' => args.get = true,
        'I' => args.method = Some("HEAD".to_string()),
        // silent, show-error, location, verbose, include, fail, globbing, ...
        _ => {}
    }
}

/// Apply a flag and its value (if any)
fn apply_flag(args: &mut CurlArgs, flag: &str, value: Option<String>) -> Result<()> {
    let require = |value: Option<String>| {
        value.ok_or_else(|| {
            FetchError::MalformedCommand(format!("Option {} requires a value", flag))
        })
    };

    match flag {
        "-X" | "--request" => args.method = Some(require(value)?.to_uppercase()),
        "-H" | "--header" => args.push_header(&require(value)?),
        "-d" | "--data" | "--data-ascii" | "--data-raw" | "--data-binary" => {
            args.push_data(&require(value)?)
        }
        "--data-urlencode" => args.push_data(&urlencode_data(&require(value)?)),
        "-b" | "--cookie" => {
            let cookie = require(value)?;
            if cookie.contains('=') {
                args.cookies.extend(parse_cookie_header(&cookie));
            } else {
                warn!(file = %cookie, "Cookie files are not read; ignoring -b argument");
            }
        }
        "-A" | "--user-agent" => {
            args.headers.insert("User-Agent".to_string(), require(value)?);
        }
        "-e" | "--referer" => {
            args.headers.insert("Referer".to_string(), require(value)?);
        }
        "-u" | "--user" => args.user = Some(require(value)?),
        "-x" | "--proxy" => args.proxy = Some(require(value)?),
        "--url" => args.url = Some(require(value)?),
        "-k" | "--insecure" => args.insecure = true,
        "-G" | "--get" => args.get = true,
        "-I" | "--head" => args.method = Some("HEAD".to_string()),
        other => {
            debug!(flag = other, "Ignoring unsupported curl option");
        }
    }

    Ok(())
}

/// Parse a header string "Name: Value"
///
/// HTTP/2 pseudo-headers (":authority: host") split at the second colon.
fn parse_header(header: &str) -> Option<(String, String)> {
    let colon_pos = if let Some(rest) = header.strip_prefix(':') {
        rest.find(':')? + 1
    } else {
        header.find(':')?
    };

    let name = header[..colon_pos].trim().to_string();
    if name.is_empty() {
        return None;
    }
    let value = header[colon_pos + 1..].trim().to_string();
    Some((name, value))
}

/// `--data-urlencode` content: `name=value` encodes only the value
fn urlencode_data(data: &str) -> String {
    let encode = |s: &str| url::form_urlencoded::byte_serialize(s.as_bytes()).collect::<String>();
    match data.split_once('=') {
        Some((name, value)) if !name.is_empty() => format!("{}={}", name, encode(value)),
        Some((_, value)) => encode(value),
        None => encode(data),
    }
}

/// Parse the URL, defaulting to http:// when no scheme is given (as curl does)
fn normalize_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    };

    Url::parse(&candidate)
        .map_err(|e| FetchError::MalformedCommand(format!("Invalid URL '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::request::RequestBody;

    #[test]
    fn test_simple_get() {
        let req = parse_curl_command("curl 'https://api.example.com/users'").unwrap();
        assert_eq!(req.method(), "GET");
        assert_eq!(req.url(), "https://api.example.com/users");
        assert!(req.body().is_none());
    }

    #[test]
    fn test_browser_capture() {
        let cmd = r#"
    curl 'https://api.example.com/stats?page=1' \
    -H 'Accept: */*' \
    -H 'Content-Type: application/json' \
    -H 'sec-ch-ua: "Google Chrome";v="143"' \
    --data-raw '{"pageSize":5,"currentPage":1}'
    "#;
        let req = parse_curl_command(cmd).unwrap();
        assert_eq!(req.method(), "POST");
        assert_eq!(req.url(), "https://api.example.com/stats?page=1");
        assert_eq!(req.headers().len(), 3);
        assert_eq!(req.header("sec-ch-ua"), Some(r#""Google Chrome";v="143""#));
        assert_eq!(
            req.classified_body(),
            RequestBody::Json(json!({"pageSize": 5, "currentPage": 1}))
        );
    }

    #[test]
    fn test_explicit_method() {
        let req = parse_curl_command("curl -X put https://x.io -d 'a=1'").unwrap();
        assert_eq!(req.method(), "PUT");
        let req = parse_curl_command("curl --request=DELETE https://x.io").unwrap();
        assert_eq!(req.method(), "DELETE");
        let req = parse_curl_command("curl -XPATCH https://x.io").unwrap();
        assert_eq!(req.method(), "PATCH");
    }

    #[test]
    fn test_repeated_headers() {
        let req = parse_curl_command(
            "curl https://x.io -H 'X-One: 1' -H 'X-Two: 2' --header 'X-One: 3'",
        )
        .unwrap();
        assert_eq!(req.headers().len(), 2);
        assert_eq!(req.header("X-One"), Some("3"));
        assert_eq!(req.header("X-Two"), Some("2"));
    }

    #[test]
    fn test_cookie_header_becomes_cookies() {
        let req = parse_curl_command(
            "curl https://x.io -H 'Cookie: session=abc123; theme=dark' -H 'Accept: */*'",
        )
        .unwrap();
        assert!(req.header("Cookie").is_none());
        assert_eq!(req.headers().len(), 1);
        assert_eq!(req.cookies().get("session").map(String::as_str), Some("abc123"));
        assert_eq!(req.cookies().get("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn test_cookie_flag() {
        let req = parse_curl_command("curl https://x.io -b 'a=1; b=2'").unwrap();
        assert_eq!(req.cookies().len(), 2);
        let req = parse_curl_command("curl https://x.io -b cookies.txt").unwrap();
        assert!(req.cookies().is_empty());
    }

    #[test]
    fn test_pseudo_header() {
        let req = parse_curl_command("curl https://x.io -H ':authority: x.io'").unwrap();
        assert_eq!(req.header(":authority"), Some("x.io"));
    }

    #[test]
    fn test_multiple_data_joined() {
        let req = parse_curl_command("curl https://x.io -d a=1 --data b=2").unwrap();
        assert_eq!(req.body(), Some("a=1&b=2"));
        assert_eq!(req.method(), "POST");
    }

    #[test]
    fn test_data_urlencode() {
        let req = parse_curl_command("curl https://x.io --data-urlencode 'q=a b&c'").unwrap();
        assert_eq!(req.body(), Some("q=a+b%26c"));
    }

    #[test]
    fn test_get_moves_data_to_query() {
        let req = parse_curl_command("curl -G https://x.io/s?x=1 -d q=rust").unwrap();
        assert_eq!(req.method(), "GET");
        assert_eq!(req.url(), "https://x.io/s?x=1&q=rust");
        assert!(req.body().is_none());
    }

    #[test]
    fn test_combined_switches_and_options() {
        let req = parse_curl_command(
            "curl -sSLk --compressed https://x.io -u admin:secret -x http://proxy:8080 -A 'Bot/1.0'",
        )
        .unwrap();
        assert!(req.insecure());
        assert_eq!(req.basic_auth(), Some("admin:secret"));
        assert_eq!(req.proxy(), Some("http://proxy:8080"));
        assert_eq!(req.header("User-Agent"), Some("Bot/1.0"));
        assert_eq!(req.url(), "https://x.io/");
    }

    #[test]
    fn test_unknown_long_flag_skips_value() {
        let req = parse_curl_command("curl --max-time 10 https://x.io").unwrap();
        assert_eq!(req.url(), "https://x.io/");
        let req = parse_curl_command("curl --unknown-switch https://x.io").unwrap();
        assert_eq!(req.url(), "https://x.io/");
    }

    #[test]
    fn test_url_without_scheme() {
        let req = parse_curl_command("curl example.com/path").unwrap();
        assert_eq!(req.url(), "http://example.com/path");
    }

    #[test]
    fn test_url_flag() {
        let req = parse_curl_command("curl --url https://x.io/a -H 'A: 1'").unwrap();
        assert_eq!(req.url(), "https://x.io/a");
    }

    #[test]
    fn test_missing_url() {
        assert!(matches!(
            parse_curl_command("curl -H 'Accept: */*'"),
            Err(FetchError::MalformedCommand(_))
        ));
        assert!(matches!(parse_curl_command("   "), Err(FetchError::MalformedCommand(_))));
        assert!(matches!(parse_curl_command("curl"), Err(FetchError::MalformedCommand(_))));
    }

    #[test]
    fn test_requires_curl_program() {
        assert!(matches!(
            parse_curl_command("wget https://x.io"),
            Err(FetchError::MalformedCommand(_))
        ));
        assert!(matches!(
            parse_curl_command("https://x.io -H 'A: 1'"),
            Err(FetchError::MalformedCommand(_))
        ));
        let req = parse_curl_command("/usr/bin/curl https://x.io/a").unwrap();
        assert_eq!(req.url(), "https://x.io/a");
        assert!(parse_curl_command("CURL.EXE https://x.io/a").is_ok());
    }

    #[test]
    fn test_missing_flag_value() {
        assert!(matches!(
            parse_curl_command("curl https://x.io -H"),
            Err(FetchError::MalformedCommand(_))
        ));
    }

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("Accept: text/html"),
            Some(("Accept".to_string(), "text/html".to_string()))
        );
        assert_eq!(
            parse_header("X-Time: 12:30"),
            Some(("X-Time".to_string(), "12:30".to_string()))
        );
        assert_eq!(parse_header("novalue"), None);
    }
}
