//! The scan-resolution workflow.

use crate::config::PollConfig;
use crate::core::{
    ContentHash, FileHasher, LookupOutcome, Result, ScanError, ScanRecord, ScanService,
    ScanTarget, TrackingId,
};
use crate::report;

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// How an invocation of [`ScanWorkflow::run`] ended.
#[derive(Debug)]
pub enum WorkflowOutcome {
    /// A report was produced and written.
    Rendered {
        /// The report text.
        report: String,
        /// Whether the results came from the hash lookup (no upload).
        cached: bool,
    },
    /// A transport error stopped the scan; a diagnostic was written instead.
    Aborted {
        /// The error that ended the scan.
        error: ScanError,
    },
}

impl WorkflowOutcome {
    /// Returns `true` if a report was produced.
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }

    /// Returns the report text, if one was produced.
    pub fn report(&self) -> Option<&str> {
        match self {
            Self::Rendered { report, .. } => Some(report),
            Self::Aborted { .. } => None,
        }
    }
}

/// A completed record and where it came from.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The completed scan record.
    pub record: ScanRecord,
    /// `true` for a hash-lookup hit.
    pub cached: bool,
}

/// Resolves a file to a finished scan: hash, look up, upload on a miss,
/// poll until complete, render.
///
/// Only [`ScanWorkflow::run`] catches errors. Every intermediate step
/// returns transport errors unchanged.
///
/// # Example
///
/// ```rust,ignore
/// use metascan::backends::MetaDefenderClient;
/// use metascan::workflow::ScanWorkflow;
///
/// let workflow = ScanWorkflow::new(MetaDefenderClient::new(config)?);
/// workflow.run("sample.exe".as_ref(), &mut std::io::stdout()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ScanWorkflow {
    service: Arc<dyn ScanService>,
    hasher: FileHasher,
    poll: PollConfig,
}

impl ScanWorkflow {
    /// Creates a workflow over the given service with unbounded polling.
    pub fn new<S: ScanService + 'static>(service: S) -> Self {
        Self::from_arc(Arc::new(service))
    }

    /// Creates a workflow over a shared service.
    pub fn from_arc(service: Arc<dyn ScanService>) -> Self {
        Self {
            service,
            hasher: FileHasher::new(),
            poll: PollConfig::default(),
        }
    }

    /// Sets the polling behavior.
    pub fn with_poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Computes the file's content hash.
    pub fn hash_file(&self, path: &Path) -> Result<ContentHash> {
        self.hasher.hash_file(path)
    }

    /// Asks the service for previous results.
    pub async fn lookup_by_hash(&self, hash: &ContentHash) -> Result<LookupOutcome> {
        self.service.lookup_hash(hash).await
    }

    /// Uploads the file for scanning.
    pub async fn upload(&self, target: &ScanTarget) -> Result<TrackingId> {
        self.service.upload(target).await
    }

    /// Polls until the service reports 100% progress.
    ///
    /// A body without `scan_results`, or with any progress other than 100,
    /// triggers another request for the same identifier. With the default
    /// [`PollConfig`] there is no delay and no limit.
    pub async fn poll_until_complete(&self, id: &TrackingId) -> Result<ScanRecord> {
        let mut attempts = 0u32;
        loop {
            if !self.poll.allows(attempts) {
                return Err(ScanError::PollLimitExceeded {
                    data_id: id.to_string(),
                    attempts,
                });
            }

            let delay = self.poll.delay_before(attempts);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let record = self.service.fetch_by_id(id).await?;
            attempts = attempts.saturating_add(1);

            if record.is_complete() {
                tracing::info!(data_id = %id, polls = attempts, "scan complete");
                return Ok(record);
            }

            tracing::debug!(
                data_id = %id,
                attempt = attempts,
                progress = ?record.progress(),
                "scan still in progress"
            );
        }
    }

    /// Hashes, looks up and, on a miss, uploads and polls.
    ///
    /// The target must already be resolved; all errors propagate.
    pub async fn resolve(&self, target: &ScanTarget) -> Result<Resolution> {
        let hash = self.hash_file(target.path())?;
        tracing::debug!(hash = %hash, service = self.service.name(), "looking up hash");

        match self.lookup_by_hash(&hash).await? {
            LookupOutcome::Found(record) => {
                tracing::info!(hash = %hash, "cached result found");
                Ok(Resolution {
                    record,
                    cached: true,
                })
            }
            LookupOutcome::NotFound => {
                tracing::info!(hash = %hash, "hash not known, uploading");
                let id = self.upload(target).await?;
                tracing::info!(data_id = %id, "upload accepted");

                let record = self.poll_until_complete(&id).await?;
                Ok(Resolution {
                    record,
                    cached: false,
                })
            }
        }
    }

    /// Runs the whole workflow for `path`, writing the report to `out`.
    ///
    /// Transport errors are caught here, written to `out` as a short
    /// diagnostic and returned as [`WorkflowOutcome::Aborted`]. A missing
    /// file, unreadable file or failed write is returned as an error.
    pub async fn run<W: Write>(&self, path: &Path, out: &mut W) -> Result<WorkflowOutcome> {
        let target = ScanTarget::new(path).resolve()?;

        match self.resolve(&target).await {
            Ok(resolution) => {
                let report = report::render(&resolution.record);
                out.write_all(report.as_bytes())?;
                Ok(WorkflowOutcome::Rendered {
                    report,
                    cached: resolution.cached,
                })
            }
            Err(error) if error.is_transport() => {
                tracing::warn!(error = %error, "scan request failed");
                writeln!(out, "Scan request error:")?;
                writeln!(out, "{}", error)?;
                Ok(WorkflowOutcome::Aborted { error })
            }
            Err(error) => Err(error),
        }
    }
}
