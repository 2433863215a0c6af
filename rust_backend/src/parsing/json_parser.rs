use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::domain::{
    text_cell, BlockTime, MissionBlock, COLUMN_CATEGORY, COLUMN_NAME, COLUMN_TIME,
};
use crate::core::error::{ImportError, MissionError, MissionResult};

use super::{check_required_columns, strip_bom};

/// Default indentation of exported JSON.
pub const DEFAULT_JSON_INDENT: usize = 2;

/// Decoded JSON table: the union of column names and one map per row.
#[derive(Debug, Default)]
struct JsonTable {
    columns: Vec<String>,
    rows: Vec<Map<String, Value>>,
}

impl JsonTable {
    fn push_column(&mut self, name: &str) {
        if !self.columns.iter().any(|c| c == name) {
            self.columns.push(name.to_string());
        }
    }

    /// Records form: `[{"Nom": ..., "Temps": ..., "Catégorie": ...}, ...]`
    fn from_records(items: Vec<Value>) -> Result<Self, ImportError> {
        let mut table = JsonTable::default();
        for (i, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(map) => {
                    for key in map.keys() {
                        table.push_column(key);
                    }
                    table.rows.push(map);
                }
                other => {
                    return Err(ImportError::Shape(format!(
                        "record {} is not an object (found {})",
                        i,
                        kind_of(&other)
                    )))
                }
            }
        }
        Ok(table)
    }

    /// Columns form: `{"Nom": [...], "Temps": [...], "Catégorie": [...]}`
    fn from_columns(map: Map<String, Value>) -> Result<Self, ImportError> {
        let mut columns: Vec<(String, Vec<Value>)> = Vec::with_capacity(map.len());
        for (name, value) in map {
            match value {
                Value::Array(cells) => columns.push((name, cells)),
                other => {
                    return Err(ImportError::Shape(format!(
                        "column '{}' is not an array (found {})",
                        name,
                        kind_of(&other)
                    )))
                }
            }
        }

        let height = columns.first().map(|(_, cells)| cells.len()).unwrap_or(0);
        if let Some((name, cells)) = columns.iter().find(|(_, cells)| cells.len() != height) {
            return Err(ImportError::Shape(format!(
                "all columns must have the same length: '{}' has {} values, expected {}",
                name,
                cells.len(),
                height
            )));
        }

        let mut table = JsonTable {
            columns: columns.iter().map(|(name, _)| name.clone()).collect(),
            rows: (0..height).map(|_| Map::new()).collect(),
        };
        for (name, cells) in columns {
            for (row, cell) in table.rows.iter_mut().zip(cells) {
                row.insert(name.clone(), cell);
            }
        }
        Ok(table)
    }

    fn into_blocks(self) -> Vec<MissionBlock> {
        self.rows
            .into_iter()
            .map(|mut row| {
                let name = row.remove(COLUMN_NAME).unwrap_or(Value::Null);
                let time = row.remove(COLUMN_TIME).unwrap_or(Value::Null);
                let category = row.remove(COLUMN_CATEGORY).unwrap_or(Value::Null);
                MissionBlock {
                    name: text_cell(&name),
                    duration: BlockTime::from_cell(time),
                    category: text_cell(&category),
                }
            })
            .collect()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse a JSON mission file into blocks.
///
/// Accepts either an array of records or an object of equal-length column
/// arrays. Keys other than `Nom`, `Temps` and `Catégorie` are ignored; a
/// record lacking one of them gets `null` for it.
pub fn parse_mission_json(bytes: &[u8]) -> MissionResult<Vec<MissionBlock>> {
    let value: Value = serde_json::from_slice(strip_bom(bytes)).map_err(ImportError::from)?;

    let table = match value {
        Value::Array(items) => JsonTable::from_records(items)?,
        Value::Object(map) => JsonTable::from_columns(map)?,
        other => {
            return Err(ImportError::Shape(format!(
                "expected an array of records or an object of columns, found {}",
                kind_of(&other)
            ))
            .into())
        }
    };

    check_required_columns(table.columns.as_slice())?;
    Ok(table.into_blocks())
}

/// Parse a JSON mission from a string.
pub fn parse_mission_json_str(json: &str) -> MissionResult<Vec<MissionBlock>> {
    parse_mission_json(json.as_bytes())
}

/// Write blocks as a pretty-printed JSON array using `indent` spaces.
pub fn write_mission_json(blocks: &[MissionBlock], indent: usize) -> MissionResult<String> {
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    blocks
        .serialize(&mut serializer)
        .map_err(|e| MissionError::Export(format!("Failed to write JSON: {}", e)))?;

    String::from_utf8(buf).map_err(|e| MissionError::Export(format!("Invalid UTF-8 in JSON: {}", e)))
}
