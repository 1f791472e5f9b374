//! Scanning service implementations.
//!
//! ## Available Backends
//!
//! - [`mock`] - A scripted in-memory service for testing
//! - [`metadefender`] - MetaDefender Cloud v4 REST API (requires `metadefender` feature)
//!
//! ## Implementing a Custom Backend
//!
//! Implement the `ScanService` trait; the workflow only ever calls its
//! three methods, one request per call.
//!
//! ```rust,ignore
//! use metascan::core::{
//!     ContentHash, LookupOutcome, Result, ScanRecord, ScanService, ScanTarget, TrackingId,
//! };
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! pub struct MyService;
//!
//! #[async_trait]
//! impl ScanService for MyService {
//!     fn name(&self) -> &str {
//!         "my-service"
//!     }
//!
//!     async fn lookup_hash(&self, hash: &ContentHash) -> Result<LookupOutcome> {
//!         todo!()
//!     }
//!
//!     async fn upload(&self, target: &ScanTarget) -> Result<TrackingId> {
//!         todo!()
//!     }
//!
//!     async fn fetch_by_id(&self, id: &TrackingId) -> Result<ScanRecord> {
//!         todo!()
//!     }
//! }
//! ```

pub mod mock;

#[cfg(feature = "metadefender")]
pub mod metadefender;

pub use mock::MockService;

#[cfg(feature = "metadefender")]
pub use metadefender::MetaDefenderClient;
