//! Converts the yearly sports licence extracts (`sport_<year>.csv`) into Turtle describing
//! regions, departments, population groups, sports and licence counts.

use crate::config::Config;
use crate::consts::{
    DEPARTMENT, DEPARTMENT_PREFIX, POPULATION_GROUP, POPULATION_GROUP_PREFIX, REGION,
    REGION_PREFIX, SPORT, SPORT_PARTICIPATION, SPORT_PARTICIPATION_PREFIX, SPORT_PREFIX,
    XSD_GYEAR,
};
use crate::errors::{LicenceColumnNotFoundError, NoInputFilesError};
use crate::options::Preamble;
use crate::sanitize::clean_uri;
use crate::tabular::{column_indices, field, open_csv};
use crate::turtle::{label_literal, local, string_literal, typed_literal, write_document, Statement};
use crate::GenerationReport;
use anyhow::Result;
use csv::StringRecord;
use globset::Glob;
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const YEAR: &str = "Année";
pub const SEX: &str = "Sexe";
pub const AGE: &str = "Age";
pub const REGION_LABEL: &str = "Région";
pub const DEPARTMENT_LABEL: &str = "Département";
pub const FEDERATION: &str = "Fédération";

pub const REQUIRED_COLUMNS: [&str; 6] = [YEAR, SEX, AGE, REGION_LABEL, DEPARTMENT_LABEL, FEDERATION];

/// Accepted spellings of the licence count header, after [`normalize_header`].
pub const LICENCE_COLUMNS: [&str; 2] = ["Licences_annuelles", "Licences__annuelles"];

const INVALID_VALUES: [&str; 5] = ["-", "", "nan", "NaN", "None"];

lazy_static! {
    static ref DEPARTMENT_CODE: Regex = Regex::new(r"\b([0-9]{2,3}|2A|2B)\b").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SportRow {
    pub year: String,
    pub sex: String,
    pub age: i64,
    pub region_label: String,
    pub department_label: String,
    pub federation: String,
    pub licences: i64,
}

/// Replaces regular and non-breaking spaces in a header with underscores.
pub fn normalize_header(header: &str) -> String {
    header.replace([' ', '\u{00A0}'], "_")
}

fn truncate(value: f64) -> i64 {
    if value.is_finite() {
        value.trunc() as i64
    } else {
        0
    }
}

/// Parses a licence count. Decimal commas are accepted, decimals are truncated, and empty or
/// placeholder values (`-`, `nan`, ...) as well as anything unparseable count as zero.
pub fn clean_int(value: &str) -> i64 {
    let value = value.replace(',', ".");
    let value = value.trim();
    if INVALID_VALUES.contains(&value) {
        return 0;
    }
    value.parse::<f64>().map(truncate).unwrap_or(0)
}

/// Parses an age. Only digits with at most one `.` are accepted; anything else is zero.
pub fn clean_age(value: &str) -> i64 {
    let value = value.trim();
    let digits = value.replacen('.', "", 1);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return 0;
    }
    value.parse::<f64>().map(truncate).unwrap_or(0)
}

/// Finds the department code (`01`, `75`, `971`, `2A`, ...) inside a department label such as
/// `"01 - Ain"` or `"Ain (01)"`. Labels without a code fall back to their sanitized form.
pub fn extract_dep_code(label: &str) -> String {
    match DEPARTMENT_CODE.captures(label) {
        Some(caps) => caps[1].to_string(),
        None => clean_uri(label),
    }
}

/// Lists the files of `dir` (not recursive) whose name matches `pattern`, sorted by path.
pub fn find_sport_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = Glob::new(pattern)?.compile_matcher();
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() && matcher.is_match(entry.file_name()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    if files.is_empty() {
        return Err(NoInputFilesError {
            directory: dir.to_path_buf(),
            pattern: pattern.to_string(),
        }
        .into());
    }
    Ok(files)
}

fn licence_column(file: &Path, headers: &StringRecord) -> Result<usize> {
    headers
        .iter()
        .position(|h| LICENCE_COLUMNS.contains(&h))
        .ok_or_else(|| {
            LicenceColumnNotFoundError {
                file: file.to_path_buf(),
                columns: headers.iter().map(str::to_string).collect(),
            }
            .into()
        })
}

/// Reads every row of one sport extract.
pub fn read_sport_rows(path: &Path, delimiter: u8) -> Result<Vec<SportRow>> {
    let mut reader = open_csv(path, delimiter)?;
    let headers: StringRecord = reader.headers()?.iter().map(normalize_header).collect();
    let required: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| normalize_header(c)).collect();
    let idx = column_indices(path, &headers, &required)?;
    let licences = licence_column(path, &headers)?;
    debug!("{}: licence column is {}", path.display(), &headers[licences]);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(SportRow {
            year: field(&record, idx[0]).trim().to_string(),
            sex: field(&record, idx[1]).trim().to_string(),
            age: clean_age(field(&record, idx[2])),
            region_label: field(&record, idx[3]).to_string(),
            department_label: field(&record, idx[4]).to_string(),
            federation: field(&record, idx[5]).to_string(),
            licences: clean_int(field(&record, licences)),
        });
    }
    Ok(rows)
}

/// The Turtle statements describing one licence row.
pub fn sport_fragments(row: &SportRow) -> Vec<String> {
    let dep_code = extract_dep_code(&row.department_label);
    let dep_u = clean_uri(&dep_code);
    let region_u = clean_uri(&row.region_label);
    let sport_u = clean_uri(&row.federation);
    let sex_u = clean_uri(&row.sex);
    let age_u = clean_uri(row.age);

    let region = local(&format!("{REGION_PREFIX}{region_u}"));
    let department = local(&format!("{DEPARTMENT_PREFIX}{dep_u}"));
    let group = local(&format!("{POPULATION_GROUP_PREFIX}{dep_u}_{age_u}_{sex_u}"));
    let sport = local(&format!("{SPORT_PREFIX}{sport_u}"));
    let year_u = clean_uri(&row.year);
    let participation = local(&format!(
        "{SPORT_PARTICIPATION_PREFIX}{dep_u}_{age_u}_{sex_u}_{sport_u}_{year_u}"
    ));

    vec![
        Statement::new(region.clone())
            .a(REGION)
            .with("rdfs:label", label_literal(&row.region_label))
            .to_string(),
        Statement::new(department.clone())
            .a(DEPARTMENT)
            .with(
                "rdfs:label",
                label_literal(&format!("{} - {}", dep_code, row.department_label)),
            )
            .with(":locatedInRegion", region)
            .to_string(),
        Statement::new(group.clone())
            .a(POPULATION_GROUP)
            .with(":age", row.age.to_string())
            .with(":sex", string_literal(&row.sex))
            .with(":locatedInDepartment", department)
            .to_string(),
        Statement::new(sport.clone())
            .a(SPORT)
            .with("rdfs:label", label_literal(&row.federation))
            .to_string(),
        Statement::new(participation)
            .a(SPORT_PARTICIPATION)
            .with(":year", typed_literal(&row.year, XSD_GYEAR))
            .with(":numLicences", row.licences.to_string())
            .with(":hasSport", sport)
            .with(":hasPopulationGroup", group)
            .to_string(),
    ]
}

/// Generates the raw sport Turtle file from every extract matched by `config`.
pub fn generate_sport(config: &Config) -> Result<GenerationReport> {
    let files = find_sport_files(&config.data_dir, &config.sport_pattern)?;
    let delimiter = config.delimiter_byte()?;
    let mut fragments = Vec::new();
    let mut rows = 0usize;
    for file in &files {
        info!("Processing {}", file.display());
        let file_rows = read_sport_rows(file, delimiter)?;
        rows += file_rows.len();
        fragments.extend(file_rows.iter().flat_map(sport_fragments));
    }
    let output = config.sport_output();
    let written = write_document(&output, Preamble::Include, &fragments)?;
    info!(
        "Generated {} from {} files ({} rows)",
        output.display(),
        files.len(),
        rows
    );
    Ok(GenerationReport {
        output,
        rows,
        fragments: written,
    })
}
