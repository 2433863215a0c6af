use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ExportSettings;
use crate::core::error::MissionResult;
use crate::mission::MissionTable;
use crate::parsing::DataFormat;

/// A downloadable export: file name, MIME type and contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub data: Vec<u8>,
}

impl ExportArtifact {
    pub fn new(file_stem: &str, format: DataFormat, data: Vec<u8>) -> Self {
        Self {
            file_name: format!("{}.{}", file_stem, format.extension()),
            mime: format.mime(),
            data,
        }
    }

    /// Contents as text, if valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }

    /// Write the artifact into `dir` under its file name.
    pub fn write_to_dir(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.data)?;
        log::info!("Wrote {} ({} bytes)", path.display(), self.data.len());
        Ok(path)
    }
}

/// CSV and JSON exports of the same table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    pub csv: ExportArtifact,
    pub json: ExportArtifact,
}

impl ExportBundle {
    pub fn build(table: &MissionTable, settings: &ExportSettings) -> MissionResult<Self> {
        let csv = table.to_csv()?;
        let json = table.to_json(settings.json_indent)?;
        Ok(Self {
            csv: ExportArtifact::new(&settings.file_stem, DataFormat::Csv, csv),
            json: ExportArtifact::new(&settings.file_stem, DataFormat::Json, json.into_bytes()),
        })
    }

    pub fn get(&self, format: DataFormat) -> &ExportArtifact {
        match format {
            DataFormat::Csv => &self.csv,
            DataFormat::Json => &self.json,
        }
    }

    /// Write both artifacts into `dir`, creating it if needed.
    pub fn write_all(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        Ok(vec![self.csv.write_to_dir(dir)?, self.json.write_to_dir(dir)?])
    }
}
