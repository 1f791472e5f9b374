//! # Metascan
//!
//! Scan a file against the MetaDefender Cloud malware-scanning API.
//!
//! ## Overview
//!
//! For one file, metascan:
//!
//! - Computes the file's SHA-1 hash
//! - Looks the hash up for existing scan results
//! - Uploads the file if the service has never seen it
//! - Polls the upload's tracking identifier until the scan reaches 100%
//! - Prints the filename, overall verdict and each engine's result
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use metascan::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let key = KeyFile::load("keys.json".as_ref())?;
//!     let client = MetaDefenderClient::new(ClientConfig::new(key))?;
//!
//!     let workflow = ScanWorkflow::new(client);
//!     workflow.run("sample.exe".as_ref(), &mut std::io::stdout()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `default` - Includes the MetaDefender HTTP backend
//! - `metadefender` - reqwest-based client for the v4 REST API
//!
//! ## Architecture
//!
//! - **Core**: Value types, the scan record, the `ScanService` trait, errors
//! - **Config**: API key file, client settings, polling policy
//! - **Backends**: The HTTP client and a scripted mock
//! - **Workflow**: Hash, look up, upload, poll, render
//! - **Report**: Plain-text report rendering

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod backends;
pub mod config;
pub mod core;
pub mod report;
pub mod workflow;

// Re-export commonly used types at the crate root
pub use crate::core::{
    ContentHash, FileHasher, LookupOutcome, ScanError, ScanRecord, ScanService, ScanTarget,
    TrackingId,
};

pub use crate::config::{ApiKey, ClientConfig, KeyFile, PollConfig};
pub use crate::workflow::{ScanWorkflow, WorkflowOutcome};

/// Prelude module for convenient imports.
///
/// ```rust
/// use metascan::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{
        ContentHash, FileHasher, LookupOutcome, ScanError, ScanRecord, ScanService, ScanTarget,
        TrackingId,
    };
    pub use crate::config::{ApiKey, ClientConfig, KeyFile, PollConfig};
    pub use crate::workflow::{ScanWorkflow, WorkflowOutcome};

    #[cfg(feature = "metadefender")]
    pub use crate::backends::MetaDefenderClient;
    pub use crate::backends::MockService;
}
