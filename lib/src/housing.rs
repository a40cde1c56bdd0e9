//! Converts the social housing extract into Turtle: one region, one department and one yearly
//! housing record per row.

use crate::config::Config;
use crate::consts::{
    DEPARTMENT, DEPARTMENT_PREFIX, HAS_HOUSING_DATA, HOUSING_DATA, HOUSING_DATA_PREFIX, REGION,
    REGION_PREFIX, XSD_DECIMAL, XSD_GYEAR,
};
use crate::options::Preamble;
use crate::sanitize::clean_uri;
use crate::tabular::{column_indices, field, open_csv};
use crate::turtle::{label_literal, local, string_literal, typed_literal, write_document, Statement};
use crate::GenerationReport;
use anyhow::Result;
use log::{debug, info};
use std::path::Path;

pub const REGION_CODE: &str = "code_region";
pub const REGION_NAME: &str = "nom_region";
pub const DEPARTMENT_CODE: &str = "code_departement";
pub const DEPARTMENT_NAME: &str = "nom_departement";
pub const PUBLICATION_YEAR: &str = "année_publication";
pub const SOCIAL_HOUSING_RATE: &str = "Taux de logements sociaux* (en %)";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    REGION_CODE,
    REGION_NAME,
    DEPARTMENT_CODE,
    DEPARTMENT_NAME,
    PUBLICATION_YEAR,
    SOCIAL_HOUSING_RATE,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HousingRow {
    pub region_code: String,
    pub region_name: String,
    pub department_code: String,
    pub department_name: String,
    pub year: i32,
    /// Share of social housing, already in `.`-decimal form
    pub social_housing_rate: String,
}

fn parse_year(value: &str) -> Option<i32> {
    let value = value.trim();
    value.parse::<i32>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|y| y.is_finite() && y.fract() == 0.0)
            .map(|y| y as i32)
    })
}

/// Reads the rows of `path` published in `year`.
pub fn read_housing_rows(path: &Path, delimiter: u8, year: i32) -> Result<Vec<HousingRow>> {
    let mut reader = open_csv(path, delimiter)?;
    let headers = reader.headers()?.clone();
    let idx = column_indices(path, &headers, &REQUIRED_COLUMNS)?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record?;
        if parse_year(field(&record, idx[4])) != Some(year) {
            skipped += 1;
            continue;
        }
        rows.push(HousingRow {
            region_code: field(&record, idx[0]).trim().to_string(),
            region_name: field(&record, idx[1]).to_string(),
            department_code: field(&record, idx[2]).trim().to_string(),
            department_name: field(&record, idx[3]).to_string(),
            year,
            social_housing_rate: field(&record, idx[5]).replace(',', ".").trim().to_string(),
        });
    }
    debug!(
        "{}: kept {} rows for {}, skipped {}",
        path.display(),
        rows.len(),
        year,
        skipped
    );
    Ok(rows)
}

/// The Turtle statements describing one housing row.
pub fn housing_fragments(row: &HousingRow) -> Vec<String> {
    let region = local(&format!("{REGION_PREFIX}{}", clean_uri(&row.region_code)));
    let dep_u = clean_uri(&row.department_code);
    let department = local(&format!("{DEPARTMENT_PREFIX}{dep_u}"));
    let year = row.year.to_string();
    let housing = local(&format!("{HOUSING_DATA_PREFIX}{dep_u}_{year}"));

    vec![
        Statement::new(region.clone())
            .a(REGION)
            .with("rdfs:label", label_literal(&row.region_name))
            .to_string(),
        Statement::new(department.clone())
            .a(DEPARTMENT)
            .with(
                "rdfs:label",
                label_literal(&format!("{} - {}", row.department_code, row.department_name)),
            )
            .with(":locatedInRegion", region)
            .with(":inseeCode", string_literal(&row.department_code))
            .to_string(),
        Statement::new(housing.clone())
            .a(HOUSING_DATA)
            .with(":year", typed_literal(&year, XSD_GYEAR))
            .with(
                ":proportionHLM",
                typed_literal(&row.social_housing_rate, XSD_DECIMAL),
            )
            .to_string(),
        Statement::new(department)
            .with(local(HAS_HOUSING_DATA), housing)
            .to_string(),
    ]
}

/// Generates the raw housing Turtle file described by `config`.
pub fn generate_housing(config: &Config) -> Result<GenerationReport> {
    info!(
        "Generating {} from {} (year {})",
        config.housing_output().display(),
        config.housing_csv.display(),
        config.housing_year
    );
    let rows = read_housing_rows(
        &config.housing_csv,
        config.delimiter_byte()?,
        config.housing_year,
    )?;
    let fragments = rows.iter().flat_map(housing_fragments);
    let output = config.housing_output();
    let written = write_document(&output, Preamble::Include, fragments)?;
    Ok(GenerationReport {
        output,
        rows: rows.len(),
        fragments: written,
    })
}
