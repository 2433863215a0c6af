use crate::core::domain::{BlockTime, MissionBlock, COLUMN_CATEGORY, COLUMN_NAME, COLUMN_TIME, REQUIRED_COLUMNS};
use crate::core::error::{ImportError, MissionError, MissionResult};

use super::{check_required_columns, strip_bom};

/// Parse a CSV mission file into blocks.
///
/// The first record is the header. Columns other than `Nom`, `Temps` and
/// `Catégorie` are ignored; `Temps` cells are kept raw unless they hold a
/// positive integer. Rows shorter than the header get empty trailing cells;
/// rows longer than the header are rejected.
pub fn parse_mission_csv(bytes: &[u8]) -> MissionResult<Vec<MissionBlock>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(strip_bom(bytes));

    let headers = reader.headers().map_err(ImportError::from)?.clone();
    if headers.is_empty() {
        return Err(ImportError::Empty.into());
    }

    let columns: Vec<&str> = headers.iter().collect();
    check_required_columns(columns.as_slice())?;

    // Presence checked above.
    let position = |name: &str| columns.iter().position(|c| *c == name).unwrap_or(0);
    let name_idx = position(COLUMN_NAME);
    let time_idx = position(COLUMN_TIME);
    let category_idx = position(COLUMN_CATEGORY);

    let mut blocks = Vec::new();
    for record in reader.records() {
        let record = record.map_err(ImportError::from)?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(ImportError::Shape(format!(
                "line {} has {} fields, expected at most {}",
                line,
                record.len(),
                headers.len()
            ))
            .into());
        }
        let field = |i: usize| record.get(i).unwrap_or_default();
        blocks.push(MissionBlock {
            name: field(name_idx).to_string(),
            duration: BlockTime::from_text(field(time_idx)),
            category: field(category_idx).to_string(),
        });
    }

    Ok(blocks)
}

/// Write blocks as CSV with the `Nom,Temps,Catégorie` header.
pub fn write_mission_csv(blocks: &[MissionBlock]) -> MissionResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(REQUIRED_COLUMNS).map_err(export_error)?;
    for block in blocks {
        writer
            .write_record([
                block.name.as_str(),
                block.duration.to_csv_field().as_str(),
                block.category.as_str(),
            ])
            .map_err(export_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| MissionError::Export(format!("Failed to flush CSV: {}", e)))
}

fn export_error(e: csv::Error) -> MissionError {
    MissionError::Export(format!("Failed to write CSV: {}", e))
}
