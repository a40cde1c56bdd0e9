//! Builds RDF Turtle from public housing and sports licence extracts and removes duplicated
//! statements from the result.
//!
//! The reusable core is small: [`sanitize::clean_uri`] turns labels into URI fragments and
//! [`dedup::clean_ttl_by_triples`] keeps each triple block once. The generators, the housing-only
//! extraction and the [`pipeline`] wire those two pieces to the CSV extracts.

pub mod config;
pub mod consts;
pub mod dedup;
pub mod errors;
pub mod extract;
pub mod housing;
pub mod options;
pub mod pipeline;
pub mod sanitize;
pub mod sport;
pub mod tabular;
pub mod turtle;

pub use dedup::{
    clean_ttl_by_triples, clean_ttl_document, collect_triples, write_triples, CleanReport,
    TripleSet,
};
pub use sanitize::clean_uri;

use std::path::PathBuf;

/// Outcome of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub output: PathBuf,
    /// CSV rows converted
    pub rows: usize,
    /// Turtle statements written, duplicates included
    pub fragments: usize,
}

pub fn init_logging() {
    // Allow SPORTHLM_LOG to override RUST_LOG for consistent CLI defaults.
    if let Ok(log_level) = std::env::var("SPORTHLM_LOG") {
        std::env::set_var("RUST_LOG", log_level);
    }
}
