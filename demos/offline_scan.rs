//! Offline scan demonstrating the full workflow against the mock service.
//!
//! This example shows how to:
//! - Script a cache miss followed by in-progress polls
//! - Run the workflow and print the report
//! - Handle a failed upload
//!
//! Run with: cargo run --example offline_scan

use metascan::backends::mock::{self, MockService};
use metascan::prelude::*;
use std::io::Write;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let mut sample = tempfile::NamedTempFile::new()?;
    sample.write_all(b"This file has never been scanned.")?;

    println!("=== Cache miss: upload and poll ===\n");

    let service = Arc::new(
        MockService::new()
            .with_upload_id("bzIxMDMxOURlbW8")
            .with_poll_response(mock::queued_record("bzIxMDMxOURlbW8"))
            .with_poll_response(mock::progress_record("bzIxMDMxOURlbW8", 35))
            .with_poll_response(mock::complete_record("demo.txt", "No Threat Detected")),
    );
    let workflow = ScanWorkflow::from_arc(service.clone());
    let outcome = workflow.run(sample.path(), &mut std::io::stdout()).await?;

    println!(
        "\n(lookups: {}, uploads: {}, polls: {}, rendered: {})",
        service.lookup_count(),
        service.upload_count(),
        service.fetch_count(),
        outcome.is_rendered()
    );

    println!("\n=== Failed upload ===\n");

    let failing = MockService::new().with_upload_failure(401, "Invalid apikey");
    let outcome = ScanWorkflow::new(failing)
        .run(sample.path(), &mut std::io::stdout())
        .await?;
    println!("\n(rendered: {})", outcome.is_rendered());

    Ok(())
}
