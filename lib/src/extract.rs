//! Pulls the housing records out of a generated housing file so they can be loaded on their own.

use crate::consts::{HAS_HOUSING_DATA, HOUSING_DATA_PREFIX};
use crate::options::Preamble;
use crate::turtle::write_document;
use anyhow::Result;
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    /// Number of `:HousingData_` statements captured
    pub records: usize,
    /// Number of `:hasHousingData` link lines appended
    pub links: usize,
}

/// Selects housing lines from `lines`.
///
/// A line starting with `:HousingData_` opens a capture that runs up to and including the next
/// blank line. Every line mentioning `:hasHousingData` is appended afterwards, in input order.
pub fn select_housing_lines(lines: &[String]) -> (Vec<String>, ExtractReport) {
    let record_start = format!(":{HOUSING_DATA_PREFIX}");
    let link = format!(":{HAS_HOUSING_DATA}");
    let mut selected = Vec::new();
    let mut report = ExtractReport::default();
    let mut capture = false;

    for line in lines {
        if line.trim().starts_with(&record_start) {
            capture = true;
            report.records += 1;
            selected.push(format!("{line}\n"));
            continue;
        }
        if capture {
            selected.push(format!("{line}\n"));
            if line.trim().is_empty() {
                capture = false;
            }
        }
    }
    for line in lines.iter().filter(|l| l.contains(&link)) {
        report.links += 1;
        selected.push(format!("{line}\n"));
    }
    (selected, report)
}

/// Writes the housing records and department links of `input` to `output`, after the prefix
/// declarations.
pub fn extract_housing_only(input: &Path, output: &Path) -> Result<ExtractReport> {
    let reader = BufReader::new(File::open(input)?);
    let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
    let (selected, report) = select_housing_lines(&lines);
    write_document(output, Preamble::Include, &selected)?;
    info!(
        "Extracted {} housing records and {} links into {}",
        report.records,
        report.links,
        output.display()
    );
    Ok(report)
}
