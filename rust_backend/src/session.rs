//! Per-session mission state.
//!
//! A [`MissionSession`] owns one catalog, one mission table and the settings
//! they were built from. The front-end keeps one session per user and calls
//! into it one action at a time; every mutating call returns the refreshed
//! [`MissionView`] so the caller can re-render without a second query.

use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::config::{AppConfig, ConfigError};
use crate::core::catalog::Catalog;
use crate::core::domain::{BlockTime, CategoryTotal, MissionBlock};
use crate::core::error::{MissionError, MissionResult};
use crate::io::export::ExportBundle;
use crate::io::loaders::{LoadedMission, MissionLoader};
use crate::mission::chart::CategoryChart;
use crate::mission::MissionTable;
use crate::parsing::DataFormat;

/// Outcome of an add request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The block was appended at `index`.
    Added { name: String, index: usize },
    /// A block with that name is already in the mission; nothing changed.
    AlreadyPresent { name: String },
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added { .. })
    }
}

/// Everything the front-end renders after an action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionView {
    pub blocks: Vec<MissionBlock>,
    pub total_minutes: u64,
    pub totals: Vec<CategoryTotal>,
    pub chart: CategoryChart,
    /// Catalog names not yet in the mission.
    pub available: Vec<String>,
}

impl MissionView {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Summary of a successful import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub rows: usize,
    pub format: DataFormat,
    pub view: MissionView,
}

/// One user's mission.
#[derive(Debug, Clone)]
pub struct MissionSession {
    config: AppConfig,
    catalog: Catalog,
    table: MissionTable,
}

impl MissionSession {
    /// Start an empty mission with the catalog selected by `config`.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let catalog = config.build_catalog()?;
        Ok(Self::with_catalog(config, catalog))
    }

    pub fn with_catalog(config: AppConfig, catalog: Catalog) -> Self {
        Self {
            config,
            catalog,
            table: MissionTable::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn table(&self) -> &MissionTable {
        &self.table
    }

    /// Names the "add block" chooser should offer.
    pub fn available_names(&self) -> Vec<&str> {
        self.catalog.available_names(&self.table)
    }

    /// Add a catalog block. A duplicate is reported as
    /// [`AddOutcome::AlreadyPresent`] instead of an error.
    pub fn add_block(&mut self, name: &str) -> MissionResult<AddOutcome> {
        match self.table.add(&self.catalog, name) {
            Ok(index) => Ok(AddOutcome::Added {
                name: name.to_string(),
                index,
            }),
            Err(MissionError::DuplicateBlock(name)) => {
                warn!("Block '{}' is already in the mission", name);
                Ok(AddOutcome::AlreadyPresent { name })
            }
            Err(e) => Err(e),
        }
    }

    pub fn remove_block(&mut self, index: usize) -> MissionResult<MissionView> {
        self.table.remove(index)?;
        Ok(self.view())
    }

    pub fn update_duration(
        &mut self,
        index: usize,
        new_duration: impl Into<BlockTime>,
    ) -> MissionResult<MissionView> {
        self.table.update_duration(index, new_duration)?;
        Ok(self.view())
    }

    /// Sanitize the table and compute everything the page shows.
    pub fn view(&mut self) -> MissionView {
        let total_minutes = self.table.total_duration();
        let totals = self.table.aggregate_by_category();
        let chart = CategoryChart::with_style(
            &totals,
            &self.config.chart.title,
            self.config.chart.palette.as_slice(),
        );
        let available = self
            .available_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        MissionView {
            blocks: self.table.blocks().to_vec(),
            total_minutes,
            totals,
            chart,
            available,
        }
    }

    /// Replace the mission with an uploaded file, dispatched on its name.
    pub fn import_bytes(&mut self, file_name: &str, bytes: &[u8]) -> MissionResult<ImportSummary> {
        let loaded = MissionLoader::load_upload(file_name, bytes).map_err(|e| {
            warn!("Import of '{}' rejected: {}", file_name, e);
            e
        })?;
        Ok(self.apply_import(file_name, loaded))
    }

    /// Replace the mission with the contents of a file on disk.
    pub fn import_file(&mut self, path: &Path) -> MissionResult<ImportSummary> {
        let loaded = MissionLoader::load_from_file(path).map_err(|e| {
            warn!("Import of {} rejected: {}", path.display(), e);
            e
        })?;
        Ok(self.apply_import(&path.display().to_string(), loaded))
    }

    fn apply_import(&mut self, origin: &str, loaded: LoadedMission) -> ImportSummary {
        let rows = loaded.blocks.len();
        self.table.replace_all(loaded.blocks);
        info!("Imported {} rows from {} ({})", rows, origin, loaded.format);
        ImportSummary {
            rows,
            format: loaded.format,
            view: self.view(),
        }
    }

    /// Build both downloadable exports of the current mission.
    pub fn export(&self) -> MissionResult<ExportBundle> {
        ExportBundle::build(&self.table, &self.config.export)
    }
}

impl Default for MissionSession {
    fn default() -> Self {
        Self::with_catalog(AppConfig::default(), Catalog::sting())
    }
}
