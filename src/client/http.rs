//! HTTP request building and sending
//!
//! This module provides the blocking HTTP transport built on reqwest.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::Method;
use std::time::Duration;
use tracing::debug;

use super::profile::BrowserProfile;
use crate::cookies::cookie_header_value;
use crate::errors::{FetchError, Result};
use crate::request::{ParsedRequest, RequestBody};

/// Fixed per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Captured headers that are not replayed
///
/// The client computes these itself; `accept-encoding` is left to reqwest so
/// that responses are decompressed transparently.
const SKIP_HEADERS: &[&str] = &[
    "host",
    "connection",
    "content-length",
    "accept-encoding",
    "transfer-encoding",
    "cookie",
];

/// Status and decoded text of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into a request failure carrying the body
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(FetchError::RequestFailure {
            message: format!("HTTP status {}", self.status),
            status: Some(self.status),
            body: Some(self.body),
        })
    }
}

/// Sends one request and returns the response
///
/// Implementations return any response that arrives, whatever its status;
/// only transport-level problems are errors.
pub trait HttpTransport {
    fn send(&self, request: &ParsedRequest, body: &RequestBody) -> Result<HttpResponse>;
}

/// reqwest-based transport with a browser identity
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    profile: BrowserProfile,
    timeout: Duration,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::with_profile(BrowserProfile::default())
    }

    pub fn with_profile(profile: BrowserProfile) -> Self {
        Self {
            profile,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn profile(&self) -> BrowserProfile {
        self.profile
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn build_client(&self, request: &ParsedRequest) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(request.insecure());

        if let Some(proxy) = request.proxy() {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| FetchError::request(format!("Invalid proxy '{}': {}", proxy, e)))?;
            builder = builder.proxy(proxy);
        }

        builder
            .build()
            .map_err(|e| FetchError::request(format!("Failed to build HTTP client: {}", e)))
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &ParsedRequest, body: &RequestBody) -> Result<HttpResponse> {
        let client = self.build_client(request)?;

        let method = Method::from_bytes(request.method().as_bytes()).map_err(|_| {
            FetchError::MalformedCommand(format!("Invalid HTTP method: {}", request.method()))
        })?;

        let mut headers = build_headers(self.profile, request)?;

        let mut builder = client.request(method, request.url());

        match body {
            RequestBody::None => {}
            RequestBody::Json(value) => {
                // .json() only sets a content type when none is present
                builder = builder.json(value);
            }
            RequestBody::Raw(raw) => {
                if !headers.contains_key(CONTENT_TYPE) {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
                }
                builder = builder.body(raw.clone());
            }
        }

        builder = builder.headers(headers);

        if let Some(user) = request.basic_auth() {
            builder = match user.split_once(':') {
                Some((name, password)) => builder.basic_auth(name, Some(password)),
                None => builder.basic_auth(user, None::<&str>),
            };
        }

        debug!(
            method = request.method(),
            url = request.url(),
            profile = %self.profile,
            body = body.kind(),
            "Sending request"
        );

        let response = builder.send()?;
        let status = response.status().as_u16();
        let text = response.text()?;

        Ok(HttpResponse::new(status, text))
    }
}

/// Merge profile defaults, captured headers and cookies into one header map
fn build_headers(profile: BrowserProfile, request: &ParsedRequest) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    for &(name, value) in profile.default_headers() {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }

    for (name, value) in request.headers() {
        if should_skip_header(name) {
            continue;
        }
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| FetchError::MalformedCommand(format!("Invalid header name '{}': {}", name, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| FetchError::MalformedCommand(format!("Invalid value for header '{}': {}", name, e)))?;
        headers.insert(header_name, header_value);
    }

    if let Some(cookie) = cookie_header_value(request.cookies()) {
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| FetchError::MalformedCommand(format!("Invalid cookie value: {}", e)))?;
        headers.insert(COOKIE, value);
    }

    Ok(headers)
}

fn should_skip_header(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    lower.starts_with(':') || SKIP_HEADERS.contains(&lower.as_str())
}
