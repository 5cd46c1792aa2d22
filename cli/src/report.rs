//! JSON run reports

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use halftone_shared::Filter;

/// Summary of one processing run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub width: u32,
    pub height: u32,
    pub filter: Filter,
    pub strategy: String,
    pub bytes: usize,
    pub elapsed_ms: f64,
}

/// Write a report as pretty-printed JSON.
pub fn write(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_carries_filter_variant() {
        let report = RunReport {
            width: 2,
            height: 1,
            filter: Filter::Threshold { threshold: 0.4 },
            strategy: "frame".to_string(),
            bytes: 8,
            elapsed_ms: 0.25,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"threshold\":"), "{json}");
        assert!(json.contains("0.4"), "{json}");
    }
}
