//! Mock scanning service for testing.
//!
//! `MockService` answers the three service calls from scripted responses
//! and counts how often each one was made, so workflow behavior can be
//! checked without a network.

use crate::core::{
    ContentHash, LookupOutcome, Result, ScanError, ScanRecord, ScanService, ScanTarget, TrackingId,
};

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

/// A scripted failure: HTTP status plus message.
#[derive(Debug, Clone)]
struct Failure {
    status: u16,
    message: String,
}

impl Failure {
    fn into_error(self, endpoint: String) -> ScanError {
        ScanError::http_status(endpoint, self.status, self.message)
    }
}

type Scripted<T> = std::result::Result<T, Failure>;

/// A mock scanning service.
///
/// Defaults: every hash lookup misses, uploads return `mock-data-id`, and
/// polls return a finished scan. Poll responses queued with
/// [`MockService::with_poll_response`] are served in order; the last one
/// repeats once the queue drains.
///
/// # Examples
///
/// ```rust
/// use metascan::backends::mock::{self, MockService};
///
/// // Cache hit: the lookup already has results.
/// let service = MockService::new().with_cached_record(mock::complete_record("report.pdf", "No Threat Detected"));
///
/// // Cache miss followed by two in-progress polls.
/// let service = MockService::new()
///     .with_poll_response(mock::progress_record("mock-data-id", 10))
///     .with_poll_response(mock::progress_record("mock-data-id", 60))
///     .with_poll_response(mock::complete_record("report.pdf", "No Threat Detected"));
/// ```
#[derive(Debug)]
pub struct MockService {
    lookup: RwLock<Scripted<LookupOutcome>>,
    upload: RwLock<Scripted<TrackingId>>,
    polls: Mutex<VecDeque<Scripted<ScanRecord>>>,
    lookup_count: AtomicU64,
    upload_count: AtomicU64,
    fetch_count: AtomicU64,
    fetched_ids: Mutex<Vec<TrackingId>>,
    looked_up: Mutex<Vec<ContentHash>>,
}

impl MockService {
    /// Creates a mock service with default responses.
    pub fn new() -> Self {
        Self {
            lookup: RwLock::new(Ok(LookupOutcome::NotFound)),
            upload: RwLock::new(Ok(TrackingId::new("mock-data-id"))),
            polls: Mutex::new(VecDeque::new()),
            lookup_count: AtomicU64::new(0),
            upload_count: AtomicU64::new(0),
            fetch_count: AtomicU64::new(0),
            fetched_ids: Mutex::new(Vec::new()),
            looked_up: Mutex::new(Vec::new()),
        }
    }

    /// Makes hash lookups return the given record.
    pub fn with_cached_record(self, record: ScanRecord) -> Self {
        *self.lookup.write().unwrap() = Ok(LookupOutcome::Found(record));
        self
    }

    /// Makes hash lookups fail with the given status.
    pub fn with_lookup_failure(self, status: u16, message: impl Into<String>) -> Self {
        *self.lookup.write().unwrap() = Err(Failure {
            status,
            message: message.into(),
        });
        self
    }

    /// Sets the identifier returned by uploads.
    pub fn with_upload_id(self, id: impl Into<String>) -> Self {
        *self.upload.write().unwrap() = Ok(TrackingId::new(id));
        self
    }

    /// Makes uploads fail with the given status.
    pub fn with_upload_failure(self, status: u16, message: impl Into<String>) -> Self {
        *self.upload.write().unwrap() = Err(Failure {
            status,
            message: message.into(),
        });
        self
    }

    /// Queues a poll response.
    pub fn with_poll_response(self, record: ScanRecord) -> Self {
        self.polls.lock().unwrap().push_back(Ok(record));
        self
    }

    /// Queues a failing poll response.
    pub fn with_poll_failure(self, status: u16, message: impl Into<String>) -> Self {
        self.polls.lock().unwrap().push_back(Err(Failure {
            status,
            message: message.into(),
        }));
        self
    }

    /// Returns the number of hash lookups made.
    pub fn lookup_count(&self) -> u64 {
        self.lookup_count.load(Ordering::Relaxed)
    }

    /// Returns the number of uploads made.
    pub fn upload_count(&self) -> u64 {
        self.upload_count.load(Ordering::Relaxed)
    }

    /// Returns the number of by-identifier retrievals made.
    pub fn fetch_count(&self) -> u64 {
        self.fetch_count.load(Ordering::Relaxed)
    }

    /// Returns every identifier passed to `fetch_by_id`, in call order.
    pub fn fetched_ids(&self) -> Vec<TrackingId> {
        self.fetched_ids.lock().unwrap().clone()
    }

    /// Returns every hash passed to `lookup_hash`, in call order.
    pub fn looked_up_hashes(&self) -> Vec<ContentHash> {
        self.looked_up.lock().unwrap().clone()
    }

    /// Returns the total number of calls of any kind.
    pub fn total_calls(&self) -> u64 {
        self.lookup_count() + self.upload_count() + self.fetch_count()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScanService for MockService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn lookup_hash(&self, hash: &ContentHash) -> Result<LookupOutcome> {
        self.lookup_count.fetch_add(1, Ordering::Relaxed);
        self.looked_up.lock().unwrap().push(hash.clone());

        self.lookup
            .read()
            .unwrap()
            .clone()
            .map_err(|f| f.into_error(format!("/hash/{}", hash.as_str())))
    }

    async fn upload(&self, target: &ScanTarget) -> Result<TrackingId> {
        self.upload_count.fetch_add(1, Ordering::Relaxed);
        std::fs::metadata(target.path())?;

        self.upload
            .read()
            .unwrap()
            .clone()
            .map_err(|f| f.into_error("/file".to_string()))
    }

    async fn fetch_by_id(&self, id: &TrackingId) -> Result<ScanRecord> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        self.fetched_ids.lock().unwrap().push(id.clone());

        let mut polls = self.polls.lock().unwrap();
        let next = if polls.len() > 1 {
            polls.pop_front()
        } else {
            polls.front().cloned()
        };

        next.unwrap_or_else(|| Ok(complete_record("mock-file", "No Threat Detected")))
            .map_err(|f| f.into_error(format!("/file/{}", id.as_str())))
    }
}

/// Builds a finished scan record with two engines.
pub fn complete_record(display_name: &str, verdict: &str) -> ScanRecord {
    ScanRecord::from_json(json!({
        "data_id": "mock-data-id",
        "file_info": { "display_name": display_name },
        "scan_results": {
            "progress_percentage": 100,
            "scan_all_result_a": verdict,
            "scan_details": {
                "ClamAV": {
                    "wait_time": 1,
                    "threat_found": "",
                    "scan_time": 14,
                    "scan_result_i": 0,
                    "def_time": "2021-03-09T00:00:00.000Z"
                },
                "Ahnlab": {
                    "wait_time": 2,
                    "threat_found": "",
                    "scan_time": 3,
                    "scan_result_i": 0,
                    "def_time": "2021-03-08T00:00:00.000Z"
                }
            }
        }
    }))
}

/// Builds an in-progress scan record.
pub fn progress_record(data_id: &str, progress: u64) -> ScanRecord {
    ScanRecord::from_json(json!({
        "data_id": data_id,
        "scan_results": {
            "progress_percentage": progress,
            "scan_details": {}
        }
    }))
}

/// Builds a retrieval body that has no `scan_results` section yet.
pub fn queued_record(data_id: &str) -> ScanRecord {
    ScanRecord::from_json(json!({ "data_id": data_id }))
}
