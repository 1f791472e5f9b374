//! Core traits for the metascan library.
//!
//! This module defines the `ScanService` trait: the three remote calls the
//! scan workflow depends on. The HTTP client and the in-memory mock both
//! implement it.

use crate::core::error::Result;
use crate::core::record::{LookupOutcome, ScanRecord};
use crate::core::types::{ContentHash, ScanTarget, TrackingId};

use async_trait::async_trait;
use std::fmt::Debug;

/// A remote scanning service keyed by content hash.
///
/// # Implementation Notes
///
/// - Every method issues exactly one request; polling and retry policy live
///   in the workflow, not here.
/// - A lookup miss is a value (`LookupOutcome::NotFound`), not an error.
/// - Implementations never recover from transport errors; they return them.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use metascan::core::{
///     ContentHash, LookupOutcome, Result, ScanRecord, ScanService, ScanTarget, TrackingId,
/// };
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct Offline;
///
/// #[async_trait]
/// impl ScanService for Offline {
///     fn name(&self) -> &str {
///         "offline"
///     }
///
///     async fn lookup_hash(&self, _hash: &ContentHash) -> Result<LookupOutcome> {
///         Ok(LookupOutcome::NotFound)
///     }
///
///     async fn upload(&self, _target: &ScanTarget) -> Result<TrackingId> {
///         todo!()
///     }
///
///     async fn fetch_by_id(&self, _id: &TrackingId) -> Result<ScanRecord> {
///         todo!()
///     }
/// }
/// ```
#[async_trait]
pub trait ScanService: Send + Sync + Debug {
    /// Returns a stable, human-readable name for log output.
    fn name(&self) -> &str;

    /// Looks up previous results for a content hash.
    ///
    /// # Errors
    ///
    /// Any failure other than the service's "hash not found" answer.
    async fn lookup_hash(&self, hash: &ContentHash) -> Result<LookupOutcome>;

    /// Uploads the target file and returns the service's tracking identifier.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Io` if the file cannot be read and a transport
    /// error for any non-success response.
    async fn upload(&self, target: &ScanTarget) -> Result<TrackingId>;

    /// Retrieves the current state of an uploaded scan, complete or not.
    async fn fetch_by_id(&self, id: &TrackingId) -> Result<ScanRecord>;
}
