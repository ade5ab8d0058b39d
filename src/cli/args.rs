//! CLI argument definitions using clap

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io::Read;
use std::path::PathBuf;

use crate::output::DEFAULT_OUTPUT_FILE;

#[derive(Parser, Debug, Clone)]
#[command(name = "curlfetch", version, about, long_about = None)]
#[command(args_override_self = true)]  // Config defaults come first, later flags win
pub struct Args {
    /// The curl command to replay (as copied from the browser)
    /// Read from --file or stdin when omitted
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,

    /// Read the curl command from a file
    #[arg(short = 'f', long = "file", value_name = "PATH", conflicts_with = "command")]
    pub file: Option<PathBuf>,

    /// Where to write the response JSON (overwritten if it exists)
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        env = "CURLFETCH_OUTPUT",
        default_value = DEFAULT_OUTPUT_FILE
    )]
    pub output: PathBuf,

    /// Rewrite -b/--cookie flags into Cookie headers before parsing
    #[arg(short = 'c', long = "convert-cookies", action = ArgAction::SetTrue)]
    pub convert_cookies: bool,

    /// Debug mode (debug-level logging)
    #[arg(long = "debug", action = ArgAction::SetTrue)]
    pub debug: bool,
}

impl Args {
    /// The command text: the positional argument, else the file, else stdin
    pub fn read_command(&self) -> Result<String> {
        if let Some(command) = &self.command {
            return Ok(command.clone());
        }

        if let Some(path) = &self.file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read command file {}", path.display()));
        }

        let mut command = String::new();
        std::io::stdin()
            .read_to_string(&mut command)
            .context("Failed to read command from stdin")?;
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["curlfetch", "curl http://x"]).unwrap();
        assert_eq!(args.command.as_deref(), Some("curl http://x"));
        assert_eq!(args.output, PathBuf::from("output.json"));
        assert!(!args.convert_cookies);
        assert!(!args.debug);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "curlfetch",
            "-c",
            "--debug",
            "--output=data.json",
            "curl http://x -b 'a=1'",
        ])
        .unwrap();
        assert!(args.convert_cookies);
        assert!(args.debug);
        assert_eq!(args.output, PathBuf::from("data.json"));
    }

    #[test]
    fn test_later_flag_wins() {
        let args = Args::try_parse_from([
            "curlfetch",
            "--output=configured.json",
            "-c",
            "-o",
            "explicit.json",
            "-c",
        ])
        .unwrap();
        assert_eq!(args.output, PathBuf::from("explicit.json"));
        assert!(args.convert_cookies);
    }

    #[test]
    fn test_file_conflicts_with_command() {
        assert!(Args::try_parse_from(["curlfetch", "-f", "cmd.txt", "curl http://x"]).is_err());
    }

    #[test]
    fn test_read_command_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cmd.txt");
        std::fs::write(&path, "curl 'http://x' \\\n  -H 'A: b'\n").unwrap();

        let args = Args::try_parse_from(["curlfetch", "-f", path.to_str().unwrap()]).unwrap();
        assert_eq!(args.read_command().unwrap(), "curl 'http://x' \\\n  -H 'A: b'\n");
    }

    #[test]
    fn test_missing_command_file() {
        let args = Args::try_parse_from(["curlfetch", "-f", "/nonexistent/cmd.txt"]).unwrap();
        assert!(args.read_command().is_err());
    }
}
