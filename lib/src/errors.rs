// Input validation errors raised while reading the CSV extracts

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub struct MissingColumnsError {
    pub file: PathBuf,
    pub columns: Vec<String>,
}

impl fmt::Display for MissingColumnsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Missing columns in {}: {}",
            self.file.display(),
            self.columns.join(", ")
        )
    }
}

impl std::error::Error for MissingColumnsError {}

#[derive(Debug)]
pub struct LicenceColumnNotFoundError {
    pub file: PathBuf,
    pub columns: Vec<String>,
}

impl fmt::Display for LicenceColumnNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "No licence column found in {} (columns: {})",
            self.file.display(),
            self.columns.join(", ")
        )
    }
}

impl std::error::Error for LicenceColumnNotFoundError {}

#[derive(Debug)]
pub struct NoInputFilesError {
    pub directory: PathBuf,
    pub pattern: String,
}

impl fmt::Display for NoInputFilesError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "No file matching {} found in {}",
            self.pattern,
            self.directory.display()
        )
    }
}

impl std::error::Error for NoInputFilesError {}
