//! Request replay pipeline and CLI entry point

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::cli::Args;
use crate::client::{HttpTransport, ReqwestTransport};
use crate::config::Config;
use crate::cookies::convert_cookie_format;
use crate::curl::{CommandParser, CurlCommandParser};
use crate::errors::{FetchError, Result};
use crate::logging::init_logging;
use crate::output::{write_payload, ResultPayload, DEFAULT_OUTPUT_FILE};
use crate::status::ExitStatus;

/// Per-call settings for [`Fetcher`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// File the payload is written to
    pub output: PathBuf,
    /// Rewrite `-b`/`--cookie` flags into `Cookie` headers before parsing
    pub convert_cookies: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            convert_cookies: false,
        }
    }
}

/// Replays curl commands: parse, send, normalize, persist
#[derive(Debug, Clone)]
pub struct Fetcher<P, T> {
    parser: P,
    transport: T,
    options: FetchOptions,
}

impl Default for Fetcher<CurlCommandParser, ReqwestTransport> {
    fn default() -> Self {
        Self::new(CurlCommandParser, ReqwestTransport::default())
    }
}

impl<P: CommandParser, T: HttpTransport> Fetcher<P, T> {
    pub fn new(parser: P, transport: T) -> Self {
        Self::with_options(parser, transport, FetchOptions::default())
    }

    pub fn with_options(parser: P, transport: T, options: FetchOptions) -> Self {
        Self {
            parser,
            transport,
            options,
        }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Replay `command` and write the normalized response to the output file
    ///
    /// Nothing is written unless a 2xx response arrives.
    pub fn fetch(&self, command: &str) -> Result<ResultPayload> {
        let command = if self.options.convert_cookies {
            convert_cookie_format(command)
        } else {
            command.to_string()
        };

        let request = self.parser.parse(&command)?;
        info!(
            url = request.url(),
            method = request.method(),
            headers = request.headers().len(),
            cookies = request.cookies().len(),
            "Parsed curl command"
        );

        let body = request.classified_body();
        debug!(kind = body.kind(), "Classified request body");

        let response = self.transport.send(&request, &body)?;
        info!(status = response.status, "Received response");
        let response = response.error_for_status()?;

        let payload = ResultPayload::from_response(response);
        if !payload.is_structured() {
            warn!("Response is not JSON, saving raw text");
        }

        let chars = write_payload(&payload, &self.options.output)?;
        info!(
            path = %self.options.output.display(),
            chars,
            "Saved response"
        );

        Ok(payload)
    }
}

/// Replay a curl command with the default browser transport
///
/// Writes to `output` (or `output.json` in the working directory). Every
/// failure is logged and turned into `None`.
pub fn fetch_from_curl(command: &str, output: Option<&Path>) -> Option<ResultPayload> {
    let options = FetchOptions {
        output: output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
        ..FetchOptions::default()
    };
    let fetcher = Fetcher::with_options(CurlCommandParser, ReqwestTransport::default(), options);

    match fetcher.fetch(command) {
        Ok(payload) => Some(payload),
        Err(e) => {
            log_failure(&e);
            None
        }
    }
}

fn log_failure(err: &FetchError) {
    error!("{}", err);
    if let Some(excerpt) = err.response_excerpt() {
        error!(status = ?err.status(), "Response body: {}", excerpt);
    }
}

/// Main entry point for the CLI.
///
/// Loads the config, parses arguments, reads the command and replays it.
pub fn run(args: Vec<String>) -> ExitStatus {
    let config = match Config::load() {
        Ok(config) => Some(config),
        Err(e) => {
            // Logging is not set up yet
            eprintln!("Warning: Failed to load config: {:#}", e);
            None
        }
    };

    let merged_args = match &config {
        Some(config) => config.merge_default_options(args),
        None => args,
    };

    let parsed = match Args::try_parse_from(&merged_args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    init_logging(parsed.debug);

    let command = match parsed.read_command() {
        Ok(command) => command,
        Err(e) => {
            error!("{:#}", e);
            return ExitStatus::Error;
        }
    };

    let options = FetchOptions {
        output: parsed.output,
        convert_cookies: parsed.convert_cookies,
    };
    let fetcher = Fetcher::with_options(CurlCommandParser, ReqwestTransport::default(), options);

    let outcome = fetcher.fetch(&command);
    if let Err(e) = &outcome {
        log_failure(e);
    }
    ExitStatus::from_outcome(&outcome)
}
