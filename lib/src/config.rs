//! Defines the configuration of a generation run: where the CSV extracts live, where the Turtle
//! files are written and how rows are filtered.

use anyhow::{anyhow, Result};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

pub const HOUSING_TTL: &str = "logements.ttl";
pub const HOUSING_CLEAN_TTL: &str = "logements_clean.ttl";
pub const SPORT_TTL: &str = "sport.ttl";
pub const SPORT_CLEAN_TTL: &str = "sport_clean.ttl";
pub const HOUSING_ONLY_TTL: &str = "housingdata_only.ttl";

#[derive(Builder, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct Config {
    /// Directory holding the `sport_*.csv` extracts
    pub data_dir: PathBuf,
    /// Directory receiving every generated Turtle file
    pub rdf_dir: PathBuf,
    /// Housing statistics extract
    pub housing_csv: PathBuf,
    /// Glob (file name only) selecting the sport extracts inside `data_dir`
    pub sport_pattern: String,
    /// Only housing rows published this year are converted
    pub housing_year: i32,
    /// CSV field delimiter
    pub delimiter: char,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("data"),
            rdf_dir: PathBuf::from("rdf"),
            housing_csv: PathBuf::from("data").join("logements.csv"),
            sport_pattern: "sport_*.csv".to_string(),
            housing_year: 2021,
            delimiter: ';',
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(anyhow!(
                "CSV delimiter must be an ASCII character, got {:?}",
                self.delimiter
            ))
        }
    }

    pub fn housing_output(&self) -> PathBuf {
        self.rdf_dir.join(HOUSING_TTL)
    }

    pub fn housing_clean_output(&self) -> PathBuf {
        self.rdf_dir.join(HOUSING_CLEAN_TTL)
    }

    pub fn sport_output(&self) -> PathBuf {
        self.rdf_dir.join(SPORT_TTL)
    }

    pub fn sport_clean_output(&self) -> PathBuf {
        self.rdf_dir.join(SPORT_CLEAN_TTL)
    }

    pub fn housing_only_output(&self) -> PathBuf {
        self.rdf_dir.join(HOUSING_ONLY_TTL)
    }

    pub fn save_to_file(&self, file: &Path) -> Result<()> {
        let config_str = serde_json::to_string_pretty(&self)?;
        let mut file = std::fs::File::create(file)?;
        file.write_all(config_str.as_bytes())?;
        Ok(())
    }

    /// Loads a JSON configuration; keys that are absent keep their default value.
    pub fn from_file(file: &Path) -> Result<Self> {
        let file = std::fs::File::open(file)?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Prints out the current Config in a clear and readable way for command line output.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  Data directory: {}", self.data_dir.display());
        println!("  RDF directory: {}", self.rdf_dir.display());
        println!("  Housing CSV: {}", self.housing_csv.display());
        println!("  Sport pattern: {}", self.sport_pattern);
        println!("  Housing year: {}", self.housing_year);
        println!("  Delimiter: {:?}", self.delimiter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_defaults_for_unset_fields() {
        let config = Config::builder()
            .rdf_dir("out")
            .housing_year(2022)
            .build()
            .unwrap();
        assert_eq!(config.rdf_dir, PathBuf::from("out"));
        assert_eq!(config.housing_year, 2022);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.sport_pattern, "sport_*.csv");
        assert_eq!(config.sport_clean_output(), PathBuf::from("out").join(SPORT_CLEAN_TTL));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"housing_year": 2019}"#).unwrap();
        assert_eq!(config.housing_year, 2019);
        assert_eq!(config.delimiter, ';');
    }

    #[test]
    fn delimiter_must_be_ascii() {
        let mut config = Config::default();
        assert_eq!(config.delimiter_byte().unwrap(), b';');
        config.delimiter = '§';
        assert!(config.delimiter_byte().is_err());
    }
}
