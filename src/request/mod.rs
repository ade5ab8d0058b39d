//! Structured request parameters
//!
//! - [`ParsedRequest`] - what a curl command describes
//! - [`RequestBody`] - the classified payload sent with it

pub mod body;

pub use body::RequestBody;

use indexmap::IndexMap;

/// Method used when the command names none and carries no body
pub const DEFAULT_METHOD: &str = "GET";

/// Request parameters extracted from a curl command
///
/// Built once by a parser and read through accessors afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    method: String,
    url: String,
    headers: IndexMap<String, String>,
    cookies: IndexMap<String, String>,
    body: Option<String>,
    insecure: bool,
    basic_auth: Option<String>,
    proxy: Option<String>,
}

impl ParsedRequest {
    /// Create a request for `url` with the default method and nothing else set
    ///
    /// The URL must be non-empty; parsers check this before building.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            method: DEFAULT_METHOD.to_string(),
            url: url.into(),
            headers: IndexMap::new(),
            cookies: IndexMap::new(),
            body: None,
            insecure: false,
            basic_auth: None,
            proxy: None,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into().to_uppercase();
        self
    }

    pub fn with_headers(mut self, headers: IndexMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_cookies(mut self, cookies: IndexMap<String, String>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn with_body(mut self, body: Option<String>) -> Self {
        self.body = body;
        self
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub fn with_basic_auth(mut self, user: Option<String>) -> Self {
        self.basic_auth = user;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    pub fn cookies(&self) -> &IndexMap<String, String> {
        &self.cookies
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Skip TLS certificate verification (`-k`)
    pub fn insecure(&self) -> bool {
        self.insecure
    }

    /// `user[:password]` from `-u`
    pub fn basic_auth(&self) -> Option<&str> {
        self.basic_auth.as_deref()
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Classify the raw body for sending
    pub fn classified_body(&self) -> RequestBody {
        RequestBody::classify(self.body())
    }
}
