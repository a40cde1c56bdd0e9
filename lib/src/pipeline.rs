//! Chains the generators, the deduplicator and the housing extraction over one configuration.

use crate::config::Config;
use crate::dedup::{clean_ttl_document, CleanReport};
use crate::extract::{extract_housing_only, ExtractReport};
use crate::housing::generate_housing;
use crate::options::Preamble;
use crate::sport::generate_sport;
use crate::GenerationReport;
use anyhow::Result;
use log::info;

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub housing: GenerationReport,
    pub sport: GenerationReport,
    pub housing_clean: CleanReport,
    pub sport_clean: CleanReport,
    pub housing_only: ExtractReport,
}

/// Runs every step in order: housing and sport generation, deduplication of both files with the
/// prefix declarations written first, then extraction of the housing records from the raw housing
/// file. The first failure aborts the run.
pub fn run_pipeline(config: &Config) -> Result<PipelineReport> {
    std::fs::create_dir_all(&config.rdf_dir)?;

    let housing = generate_housing(config)?;
    let sport = generate_sport(config)?;
    let housing_clean = clean_ttl_document(
        &housing.output,
        &config.housing_clean_output(),
        Preamble::Include,
    )?;
    let sport_clean =
        clean_ttl_document(&sport.output, &config.sport_clean_output(), Preamble::Include)?;
    let housing_only = extract_housing_only(&housing.output, &config.housing_only_output())?;

    info!("Pipeline finished, outputs in {}", config.rdf_dir.display());
    Ok(PipelineReport {
        housing,
        sport,
        housing_clean,
        sport_clean,
        housing_only,
    })
}
