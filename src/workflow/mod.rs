//! Scan-resolution workflow.
//!
//! Per invocation the workflow moves through:
//!
//! ```text
//! START -> HASHED -> LOOKED_UP -> CACHED ----------------------------> RENDERED
//!                              \-> UPLOADED -> POLLING -> COMPLETE -/
//! ```
//!
//! `POLLING` repeats while progress is below 100. A missing file or a
//! transport error other than the lookup's "not found" answer ends the run
//! early.

mod scan_workflow;

pub use scan_workflow::{Resolution, ScanWorkflow, WorkflowOutcome};
