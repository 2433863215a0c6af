//! The mission table: an ordered collection of [`MissionBlock`]s.
//!
//! Names are unique among blocks added through [`MissionTable::add`]. Imports
//! replace the whole table and are trusted as-is, so they may bring duplicate
//! names or unsanitized durations with them.

use std::collections::BTreeMap;

use log::debug;

use crate::core::catalog::Catalog;
use crate::core::domain::{BlockTime, CategoryTotal, MissionBlock};
use crate::core::error::{MissionError, MissionResult};
use crate::parsing::json_parser::DEFAULT_JSON_INDENT;
use crate::parsing::{csv_parser, json_parser, parse_mission, DataFormat};

/// Both export encodings of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedMission {
    pub csv: Vec<u8>,
    pub json: String,
}

/// Ordered list of blocks selected into the current mission.
///
/// # Examples
///
/// ```
/// use sting_rust::core::Catalog;
/// use sting_rust::mission::MissionTable;
///
/// let catalog = Catalog::sting();
/// let mut table = MissionTable::new();
/// table.add(&catalog, "Contrat direct").unwrap();
/// table.add(&catalog, "Portail").unwrap();
/// assert_eq!(table.total_duration(), 20);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissionTable {
    blocks: Vec<MissionBlock>,
}

impl MissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows without any validation, as an import does.
    pub fn from_blocks(blocks: Vec<MissionBlock>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[MissionBlock] {
        &self.blocks
    }

    pub fn get(&self, index: usize) -> Option<&MissionBlock> {
        self.blocks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MissionBlock> {
        self.blocks.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blocks.iter().any(|b| b.name == name)
    }

    /// Index of the first block named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.name == name)
    }

    fn check_index(&self, index: usize) -> MissionResult<()> {
        if index < self.blocks.len() {
            Ok(())
        } else {
            Err(MissionError::IndexOutOfRange {
                index,
                len: self.blocks.len(),
            })
        }
    }

    /// Append the catalog block `name` with its default duration.
    ///
    /// Returns the index of the new block. Fails with
    /// [`MissionError::DuplicateBlock`] if a block with that name is already
    /// present, or [`MissionError::NotFound`] if the catalog has no such entry.
    /// The table is unchanged on failure.
    pub fn add(&mut self, catalog: &Catalog, name: &str) -> MissionResult<usize> {
        if self.contains(name) {
            return Err(MissionError::DuplicateBlock(name.to_string()));
        }
        let definition = catalog.lookup(name)?;
        self.blocks.push(MissionBlock::from_definition(definition));
        debug!(
            "Added block '{}' ({} min, {}) at index {}",
            definition.name,
            definition.default_duration,
            definition.category,
            self.blocks.len() - 1
        );
        Ok(self.blocks.len() - 1)
    }

    /// Remove and return the block at `index`; later blocks shift down by one.
    pub fn remove(&mut self, index: usize) -> MissionResult<MissionBlock> {
        self.check_index(index)?;
        let removed = self.blocks.remove(index);
        debug!("Removed block '{}' from index {}", removed.name, index);
        Ok(removed)
    }

    /// Replace the duration of the block at `index`.
    ///
    /// The value is coerced right away: anything that is not a positive
    /// integer is stored as 0. Returns the stored minutes.
    pub fn update_duration(
        &mut self,
        index: usize,
        new_duration: impl Into<BlockTime>,
    ) -> MissionResult<u32> {
        self.check_index(index)?;
        let minutes = new_duration.into().minutes();
        let block = &mut self.blocks[index];
        block.duration = BlockTime::Minutes(minutes);
        debug!("Set duration of '{}' to {} min", block.name, minutes);
        Ok(minutes)
    }

    /// Coerce every pending duration in place. Returns how many were rewritten.
    pub fn sanitize(&mut self) -> usize {
        let mut rewritten = 0;
        for block in self.blocks.iter_mut().filter(|b| b.duration.is_pending()) {
            block.duration = block.duration.sanitized();
            rewritten += 1;
        }
        if rewritten > 0 {
            debug!("Sanitized {} pending durations", rewritten);
        }
        rewritten
    }

    /// Sum of durations per category, sorted by category name.
    ///
    /// Categories are grouped verbatim, so `"Collecte"` and `"collecte"` are
    /// distinct. Sanitizes the table first.
    pub fn aggregate_by_category(&mut self) -> Vec<CategoryTotal> {
        self.sanitize();
        let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
        for block in &self.blocks {
            *totals.entry(block.category.as_str()).or_insert(0) += u64::from(block.minutes());
        }
        totals
            .into_iter()
            .map(|(category, minutes)| CategoryTotal {
                category: category.to_string(),
                minutes,
            })
            .collect()
    }

    /// Sum of all durations in minutes. Sanitizes the table first.
    pub fn total_duration(&mut self) -> u64 {
        self.sanitize();
        self.blocks.iter().map(|b| u64::from(b.minutes())).sum()
    }

    /// Replace every block at once and return the previous ones.
    pub fn replace_all(&mut self, blocks: Vec<MissionBlock>) -> Vec<MissionBlock> {
        std::mem::replace(&mut self.blocks, blocks)
    }

    pub fn to_csv(&self) -> MissionResult<Vec<u8>> {
        csv_parser::write_mission_csv(&self.blocks)
    }

    pub fn to_json(&self, indent: usize) -> MissionResult<String> {
        json_parser::write_mission_json(&self.blocks, indent)
    }

    /// Encode the table as CSV and as two-space indented JSON.
    pub fn serialize(&self) -> MissionResult<SerializedMission> {
        Ok(SerializedMission {
            csv: self.to_csv()?,
            json: self.to_json(DEFAULT_JSON_INDENT)?,
        })
    }

    /// Replace the table with the rows of a CSV or JSON file.
    ///
    /// On any parse or schema failure the table is left as it was. Returns
    /// the number of imported rows.
    pub fn deserialize(&mut self, bytes: &[u8], format: DataFormat) -> MissionResult<usize> {
        let blocks = parse_mission(bytes, format)?;
        let count = blocks.len();
        self.replace_all(blocks);
        debug!("Replaced mission with {} rows from {}", count, format);
        Ok(count)
    }
}

impl<'a> IntoIterator for &'a MissionTable {
    type Item = &'a MissionBlock;
    type IntoIter = std::slice::Iter<'a, MissionBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
