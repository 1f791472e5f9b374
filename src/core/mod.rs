//! Core types and traits for the metascan library.
//!
//! - [`types`] - `ScanTarget`, `ContentHash`, `TrackingId`
//! - [`record`] - `ScanRecord` and lookup outcomes
//! - [`traits`] - The `ScanService` trait
//! - [`error`] - Structured error types
//! - [`hasher`] - SHA-1 file hashing

pub mod error;
pub mod hasher;
pub mod record;
pub mod traits;
pub mod types;

pub use error::{Result, ScanError};
pub use hasher::FileHasher;
pub use record::{EngineResult, LookupOutcome, ScanRecord};
pub use traits::ScanService;
pub use types::{ContentHash, ScanTarget, TrackingId};
