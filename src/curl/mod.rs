//! cURL command import
//!
//! Parses commands copied from a browser's developer tools ("Copy as cURL")
//! into [`ParsedRequest`] values.
//!
//! # Example
//!
//! ```
//! use curlfetch::curl::{CommandParser, CurlCommandParser};
//!
//! let request = CurlCommandParser
//!     .parse("curl 'https://api.example.com/users' -H 'Accept: application/json'")
//!     .unwrap();
//! assert_eq!(request.method(), "GET");
//! assert_eq!(request.header("accept"), Some("application/json"));
//! ```

pub mod parser;
pub mod tokenizer;

pub use parser::parse_curl_command;
pub use tokenizer::tokenize;

use crate::errors::Result;
use crate::request::ParsedRequest;

/// Turns a command string into request parameters
pub trait CommandParser {
    fn parse(&self, command: &str) -> Result<ParsedRequest>;
}

/// Parser for curl command lines
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlCommandParser;

impl CommandParser for CurlCommandParser {
    fn parse(&self, command: &str) -> Result<ParsedRequest> {
        parse_curl_command(command)
    }
}
