//! Scan records as returned by the remote service.
//!
//! The service's JSON is kept as-is (key order preserved) and read through
//! accessor methods, so fields this crate does not know about still reach
//! the per-engine report.

use serde_json::{Map, Value};

/// Per-engine field holding the engine's scan duration; never displayed.
pub const TIMING_FIELD: &str = "scan_time";

/// Progress value the service reports once every engine has finished.
pub const COMPLETE_PROGRESS: u64 = 100;

/// The service's view of a scan: filename, verdict and per-engine results.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRecord {
    raw: Value,
}

impl ScanRecord {
    /// Wraps a JSON body returned by the lookup or retrieval endpoint.
    pub fn from_json(raw: Value) -> Self {
        Self { raw }
    }

    /// Returns `file_info.display_name`.
    pub fn display_name(&self) -> Option<&str> {
        self.raw
            .get("file_info")
            .and_then(|f| f.get("display_name"))
            .and_then(Value::as_str)
    }

    /// Returns `scan_results.scan_all_result_a`, the overall verdict.
    pub fn verdict(&self) -> Option<&str> {
        self.scan_results()
            .and_then(|r| r.get("scan_all_result_a"))
            .and_then(Value::as_str)
    }

    /// Returns the tracking identifier echoed in the body, if any.
    pub fn data_id(&self) -> Option<&str> {
        self.raw.get("data_id").and_then(Value::as_str)
    }

    /// Returns `true` if the body carries a `scan_results` section.
    pub fn has_scan_results(&self) -> bool {
        self.scan_results().is_some()
    }

    /// Returns `scan_results.progress_percentage`.
    ///
    /// A whole-number float such as `100.0` counts; fractional values do not.
    pub fn progress(&self) -> Option<u64> {
        let value = self.scan_results()?.get("progress_percentage")?;
        value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        })
    }

    /// Returns `true` once the service reports exactly 100% progress.
    pub fn is_complete(&self) -> bool {
        self.progress() == Some(COMPLETE_PROGRESS)
    }

    /// Iterates over `scan_results.scan_details` in response order.
    pub fn engines(&self) -> impl Iterator<Item = EngineResult<'_>> {
        self.scan_results()
            .and_then(|r| r.get("scan_details"))
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|details| details.iter())
            .map(|(name, value)| EngineResult {
                name: name.as_str(),
                value,
            })
    }

    fn scan_results(&self) -> Option<&Value> {
        self.raw.get("scan_results")
    }
}

/// One engine's entry in `scan_details`.
#[derive(Debug, Clone, Copy)]
pub struct EngineResult<'a> {
    name: &'a str,
    value: &'a Value,
}

impl<'a> EngineResult<'a> {
    /// Returns the engine name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Iterates over the engine's fields, skipping the timing field.
    pub fn fields(&self) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.value
            .as_object()
            .map(Map::iter)
            .into_iter()
            .flatten()
            .filter(|(key, _)| key.as_str() != TIMING_FIELD)
            .map(|(key, value)| (key.as_str(), value))
    }
}

/// Result of a hash lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// The service already holds results for this hash.
    Found(ScanRecord),
    /// The service has never seen this hash (error code 404003).
    NotFound,
}

impl LookupOutcome {
    /// Returns `true` for a cache hit.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}
