//! Human-readable scan reports.
//!
//! ```text
//! filename: sample.exe
//! overall_status: No Threat Detected
//!
//! engine: ClamAV
//! threat_found:
//! scan_result_i: 0
//! ```
//!
//! Each engine's timing field is left out.

use crate::core::ScanRecord;

use serde_json::Value;
use std::fmt::Write as _;

/// Shown when the record lacks a filename or verdict.
pub const MISSING_FIELD: &str = "(unknown)";

/// Renders a completed scan record as report text.
pub fn render(record: &ScanRecord) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "filename: {}", record.display_name().unwrap_or(MISSING_FIELD));
    let _ = writeln!(out, "overall_status: {}", record.verdict().unwrap_or(MISSING_FIELD));

    for engine in record.engines() {
        let _ = writeln!(out, "\nengine: {}", engine.name());
        for (key, value) in engine.fields() {
            let _ = writeln!(out, "{}: {}", key, format_value(value));
        }
    }

    out
}

/// Formats a field value: strings bare, everything else as compact JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::mock;
    use serde_json::json;

    #[test]
    fn test_render_layout() {
        let record = ScanRecord::from_json(json!({
            "file_info": { "display_name": "sample.exe" },
            "scan_results": {
                "progress_percentage": 100,
                "scan_all_result_a": "Infected",
                "scan_details": {
                    "ClamAV": { "threat_found": "Eicar-Test-Signature", "scan_time": 9, "scan_result_i": 1 }
                }
            }
        }));

        let expected = "filename: sample.exe\n\
                        overall_status: Infected\n\
                        \n\
                        engine: ClamAV\n\
                        threat_found: Eicar-Test-Signature\n\
                        scan_result_i: 1\n";
        assert_eq!(render(&record), expected);
    }

    #[test]
    fn test_render_never_includes_timing() {
        let report = render(&mock::complete_record("a.bin", "No Threat Detected"));
        assert!(report.contains("engine: ClamAV"));
        assert!(report.contains("engine: Ahnlab"));
        assert!(!report.contains("scan_time"));
    }

    #[test]
    fn test_render_engine_order_follows_response() {
        let report = render(&mock::complete_record("a.bin", "No Threat Detected"));
        let clamav = report.find("engine: ClamAV").unwrap();
        let ahnlab = report.find("engine: Ahnlab").unwrap();
        assert!(clamav < ahnlab);
    }

    #[test]
    fn test_render_missing_fields() {
        let record = ScanRecord::from_json(json!({ "scan_results": { "progress_percentage": 100 } }));
        assert_eq!(
            render(&record),
            "filename: (unknown)\noverall_status: (unknown)\n"
        );
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("text")), "text");
        assert_eq!(format_value(&json!(12)), "12");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(["a", 1])), r#"["a",1]"#);
    }
}
