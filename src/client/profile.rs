//! Browser identity profiles
//!
//! A profile is the header set a given browser sends by default. Captured
//! headers always take precedence; profile headers only fill the gaps.

use std::fmt;
use std::str::FromStr;

const CHROME_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

const CHROME110_HEADERS: &[(&str, &str)] = &[
    ("sec-ch-ua", r#""Chromium";v="110", "Not A(Brand";v="24", "Google Chrome";v="110""#),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", r#""Windows""#),
    ("upgrade-insecure-requests", "1"),
    ("user-agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36"),
    ("accept", CHROME_ACCEPT),
    ("sec-fetch-site", "none"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-user", "?1"),
    ("sec-fetch-dest", "document"),
    ("accept-language", "en-US,en;q=0.9"),
];

const CHROME120_HEADERS: &[(&str, &str)] = &[
    ("sec-ch-ua", r#""Not_A Brand";v="8", "Chromium";v="120", "Google Chrome";v="120""#),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", r#""macOS""#),
    ("upgrade-insecure-requests", "1"),
    ("user-agent", "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"),
    ("accept", CHROME_ACCEPT),
    ("sec-fetch-site", "none"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-user", "?1"),
    ("sec-fetch-dest", "document"),
    ("accept-language", "en-US,en;q=0.9"),
];

/// Named browser identity used for outgoing requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserProfile {
    #[default]
    Chrome110,
    Chrome120,
}

impl BrowserProfile {
    pub fn name(&self) -> &'static str {
        match self {
            BrowserProfile::Chrome110 => "chrome110",
            BrowserProfile::Chrome120 => "chrome120",
        }
    }

    /// Headers the browser sends when the page does not override them
    pub fn default_headers(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            BrowserProfile::Chrome110 => CHROME110_HEADERS,
            BrowserProfile::Chrome120 => CHROME120_HEADERS,
        }
    }

    pub fn user_agent(&self) -> &'static str {
        self.default_headers()
            .iter()
            .find(|(name, _)| *name == "user-agent")
            .map(|(_, value)| *value)
            .unwrap_or_default()
    }
}

impl fmt::Display for BrowserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BrowserProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chrome110" => Ok(BrowserProfile::Chrome110),
            "chrome120" | "chrome" => Ok(BrowserProfile::Chrome120),
            other => Err(format!("Unknown browser profile: {}", other)),
        }
    }
}
