//! curlfetch library interface
//!
//! Replays HTTP requests captured as curl commands (for example with a
//! browser's "Copy as cURL") and saves the response as JSON.
//!
//! # Module Organization
//!
//! - [`cookies`] - `-b`/`--cookie` normalization and cookie header parsing
//! - [`curl`] - curl command tokenizing and parsing (CommandParser)
//! - [`request`] - Parsed request parameters and body classification
//! - [`client`] - Blocking HTTP transport with a browser profile (HttpTransport)
//! - [`output`] - Response normalization and JSON persistence
//! - [`errors`] - Error types (FetchError, Result)
//! - [`status`] - Exit status codes (ExitStatus)
//! - [`core`] - Fetch pipeline and CLI entry point
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let command = "curl 'https://api.example.com/stats' -H 'Accept: application/json'";
//! match curlfetch::fetch_from_curl(command, Some(Path::new("stats.json"))) {
//!     Some(payload) => println!("saved: {}", payload.is_structured()),
//!     None => eprintln!("request failed"),
//! }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod cookies;
pub mod core;
pub mod curl;
pub mod errors;
pub mod logging;
pub mod output;
pub mod request;
pub mod status;

pub use crate::client::{BrowserProfile, HttpResponse, HttpTransport, ReqwestTransport};
pub use crate::cookies::convert_cookie_format;
pub use crate::core::{fetch_from_curl, FetchOptions, Fetcher};
pub use crate::curl::{CommandParser, CurlCommandParser};
pub use crate::errors::{FetchError, Result};
pub use crate::output::ResultPayload;
pub use crate::request::{ParsedRequest, RequestBody};
