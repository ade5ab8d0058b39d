//! Common test utilities for curlfetch integration tests
//!
//! This module provides shared test infrastructure including:
//! - A per-test working directory and config directory
//! - CLI invocation helpers
//! - Library calls moved off the async test runtime

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use curlfetch::ResultPayload;

/// An address nothing listens on
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1/";

/// Isolated working and config directories for one test
pub struct TestEnv {
    work_dir: TempDir,
    config_dir: TempDir,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create temp work dir"),
            config_dir: TempDir::new().expect("Failed to create temp config dir"),
        }
    }

    pub fn work_path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Path of `name` inside the working directory
    pub fn path(&self, name: &str) -> PathBuf {
        self.work_dir.path().join(name)
    }

    /// Write `config.toml` into the config directory
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_dir.path().join("config.toml"), content)
            .expect("Failed to write config");
    }

    /// Read a JSON file from the working directory
    pub fn read_json(&self, name: &str) -> serde_json::Value {
        let text = self.read_text(name);
        serde_json::from_str(&text).expect("Output is not valid JSON")
    }

    pub fn read_text(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).expect("Failed to read output file")
    }

    /// The curlfetch binary, run inside the working directory
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("curlfetch").expect("curlfetch binary not built");
        cmd.current_dir(self.work_dir.path())
            .env("CURLFETCH_CONFIG_DIR", self.config_dir.path())
            .env_remove("CURLFETCH_OUTPUT")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Run `curlfetch::fetch_from_curl` on a blocking thread
///
/// The blocking reqwest client must not run on the async test runtime.
pub async fn fetch_blocking(command: String, output: PathBuf) -> Option<ResultPayload> {
    tokio::task::spawn_blocking(move || curlfetch::fetch_from_curl(&command, Some(&output)))
        .await
        .expect("fetch task panicked")
}

/// Run an arbitrary blocking closure from an async test
pub async fn blocking<F, R>(f: F) -> R
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.expect("blocking task panicked")
}
