//! Configuration: the API key file, client settings and polling policy.

mod client;
mod keys;
mod poll;

pub use client::{ClientConfig, DEFAULT_BASE_URL};
pub use keys::{ApiKey, KeyFile, DEFAULT_KEY_FILE};
pub use poll::PollConfig;
