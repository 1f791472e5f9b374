//! Command-line arguments.

use clap::{ArgAction, Parser};
use metascan::config::{ClientConfig, PollConfig, DEFAULT_BASE_URL, DEFAULT_KEY_FILE};
use metascan::{ApiKey, ScanError};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "metascan")]
#[command(version)]
#[command(about = "Scan a file with MetaDefender Cloud")]
#[command(long_about = "Looks up the file's SHA-1 on MetaDefender Cloud, uploads the file if it \
has never been scanned, waits for the scan to finish and prints each engine's result.")]
pub struct Cli {
    /// File to scan
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// JSON file holding the "Meta_Cloud_Key" API key
    #[arg(long, value_name = "PATH", default_value = DEFAULT_KEY_FILE)]
    pub keys: PathBuf,

    /// API base URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Delay between result polls in milliseconds (default: none)
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Give up after this many result polls (default: poll until complete)
    #[arg(long, value_name = "N")]
    pub max_polls: Option<u32>,

    /// Per-request timeout in seconds (default: none)
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parses process arguments.
    pub fn parse_args() -> Result<Self, ScanError> {
        Self::parse_from_args(std::env::args_os())
    }

    /// Parses the given arguments, the first being the program name.
    ///
    /// `--help` and `--version` print and exit; every other parse failure,
    /// including a wrong number of file paths, becomes a usage error carrying
    /// clap's own description of what was wrong.
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|e| match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let rendered = e.render().to_string();
                let message = rendered.strip_prefix("error: ").unwrap_or(&rendered);
                ScanError::usage(message.trim_end())
            }
        })
    }

    /// Builds the client configuration around an already loaded key.
    pub fn client_config(&self, api_key: ApiKey) -> ClientConfig {
        let mut poll = PollConfig::unbounded();
        if let Some(ms) = self.poll_interval_ms {
            poll = poll.with_interval(Duration::from_millis(ms));
        }
        if let Some(max) = self.max_polls {
            poll = poll.with_max_attempts(max);
        }

        let mut config = ClientConfig::new(api_key)
            .with_base_url(self.base_url.clone())
            .with_poll(poll);
        if let Some(secs) = self.timeout_secs {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_path() {
        let cli = Cli::try_parse_from(["metascan", "sample.exe"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("sample.exe"));
        assert_eq!(cli.keys, PathBuf::from(DEFAULT_KEY_FILE));
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_wrong_path_count_rejected() {
        assert!(Cli::try_parse_from(["metascan"]).is_err());
        assert!(Cli::try_parse_from(["metascan", "a.exe", "b.exe"]).is_err());
    }

    #[test]
    fn test_invalid_number_reports_the_flag() {
        let err = Cli::parse_from_args(["metascan", "--max-polls", "abc", "a.exe"]).unwrap_err();
        assert!(matches!(err, ScanError::Usage { .. }));

        let message = err.to_string();
        assert!(message.contains("abc"), "{message}");
        assert!(message.contains("--max-polls"), "{message}");
        assert!(!message.contains("exactly one file path"), "{message}");
    }

    #[test]
    fn test_extra_path_reported() {
        let err = Cli::parse_from_args(["metascan", "a.exe", "b.exe"]).unwrap_err();
        assert!(matches!(err, ScanError::Usage { .. }));
        assert!(err.to_string().contains("b.exe"));
    }

    #[test]
    fn test_missing_path_reported() {
        let err = Cli::parse_from_args(["metascan"]).unwrap_err();
        assert!(err.to_string().contains("<FILE>"));
    }

    #[test]
    fn test_client_config_defaults_are_unbounded() {
        let cli = Cli::try_parse_from(["metascan", "a.exe"]).unwrap();
        let config = cli.client_config(ApiKey::new("k").unwrap());
        assert!(config.poll.is_unbounded());
        assert_eq!(config.poll.interval, Duration::ZERO);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_client_config_from_flags() {
        let cli = Cli::try_parse_from([
            "metascan",
            "--poll-interval-ms",
            "500",
            "--max-polls",
            "20",
            "--timeout-secs",
            "30",
            "--base-url",
            "http://localhost:8008/v4",
            "-vv",
            "a.exe",
        ])
        .unwrap();
        let config = cli.client_config(ApiKey::new("k").unwrap());

        assert_eq!(config.poll.interval, Duration::from_millis(500));
        assert_eq!(config.poll.max_attempts, Some(20));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.base_url, "http://localhost:8008/v4");
        assert_eq!(cli.verbose, 2);
    }
}
