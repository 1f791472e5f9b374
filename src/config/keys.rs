//! API key loading.
//!
//! The key lives in a small JSON file next to the working directory:
//!
//! ```json
//! { "Meta_Cloud_Key": "..." }
//! ```

use crate::core::{Result, ScanError};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Default key file name, resolved against the working directory.
pub const DEFAULT_KEY_FILE: &str = "keys.json";

/// A MetaDefender API key. Never printed.
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Wraps a key, rejecting empty and whitespace-only values.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ScanError::configuration("API key is empty"));
        }
        Ok(Self(SecretString::new(key.into())))
    }

    /// Returns the key for use in a request header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// On-disk shape of the key file.
#[derive(Deserialize)]
struct KeyFileContents {
    #[serde(rename = "Meta_Cloud_Key")]
    meta_cloud_key: Option<String>,
}

/// Loader for the JSON key file.
#[derive(Debug)]
pub struct KeyFile;

impl KeyFile {
    /// Reads `Meta_Cloud_Key` from the JSON file at `path`.
    ///
    /// A missing file, unparseable JSON, a missing field or an empty value
    /// are all configuration errors.
    pub fn load(path: &Path) -> Result<ApiKey> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ScanError::configuration(format!("cannot read key file '{}': {}", path.display(), e))
        })?;
        Self::parse(&text).map_err(|e| match e {
            ScanError::Configuration { message } => ScanError::configuration(format!(
                "{} in key file '{}'",
                message,
                path.display()
            )),
            other => other,
        })
    }

    /// Parses key file contents.
    pub fn parse(text: &str) -> Result<ApiKey> {
        let contents: KeyFileContents = serde_json::from_str(text)
            .map_err(|e| ScanError::configuration(format!("invalid JSON ({})", e)))?;

        match contents.meta_cloud_key {
            Some(key) => ApiKey::new(key)
                .map_err(|_| ScanError::configuration("'Meta_Cloud_Key' is empty")),
            None => Err(ScanError::configuration("'Meta_Cloud_Key' is missing")),
        }
    }
}
