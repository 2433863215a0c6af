//! Parsers and writers for mission files.
//!
//! A mission file is a table with the columns `Nom`, `Temps` and `Catégorie`,
//! stored either as CSV or as a JSON array of records.
//!
//! # Parsers
//!
//! - [`csv_parser`]: Read and write the CSV form
//! - [`json_parser`]: Read and write the JSON form (records or columns)
//!
//! # Example
//!
//! ```
//! use sting_rust::parsing::{parse_mission, DataFormat};
//!
//! let csv = "Nom,Temps,Catégorie\nPortail,5,contractualisation\n";
//! let blocks = parse_mission(csv.as_bytes(), DataFormat::Csv).unwrap();
//! assert_eq!(blocks.len(), 1);
//! ```

pub mod csv_parser;
pub mod json_parser;


use std::fmt;

use crate::core::domain::{MissionBlock, REQUIRED_COLUMNS};
use crate::core::error::{ImportError, MissionError, MissionResult};

/// Supported mission file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    /// Pick the format from a file name suffix (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Result<Self, ImportError> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".csv") {
            Ok(DataFormat::Csv)
        } else if lower.ends_with(".json") {
            Ok(DataFormat::Json)
        } else {
            Err(ImportError::UnsupportedFormat(file_name.to_string()))
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DataFormat::Csv => "csv",
            DataFormat::Json => "json",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            DataFormat::Csv => "text/csv",
            DataFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataFormat::Csv => "CSV",
            DataFormat::Json => "JSON",
        })
    }
}

/// Parse a mission file of the given format.
pub fn parse_mission(bytes: &[u8], format: DataFormat) -> MissionResult<Vec<MissionBlock>> {
    match format {
        DataFormat::Csv => csv_parser::parse_mission_csv(bytes),
        DataFormat::Json => json_parser::parse_mission_json(bytes),
    }
}

/// Fail with [`MissionError::Schema`] unless every required column is present.
pub(crate) fn check_required_columns<S: AsRef<str>>(columns: &[S]) -> MissionResult<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !columns.iter().any(|c| c.as_ref() == **required))
        .map(|required| required.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissionError::Schema { missing })
    }
}

pub(crate) fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}
