use std::fs;
use std::path::{Path, PathBuf};

use crate::core::domain::MissionBlock;
use crate::core::error::{ImportError, MissionResult};
use crate::parsing::{parse_mission, DataFormat};

/// Result of loading a mission file
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMission {
    pub blocks: Vec<MissionBlock>,
    pub format: DataFormat,
    /// File the rows came from, when loaded from disk.
    pub source: Option<PathBuf>,
}

/// Unified interface for loading missions from CSV or JSON
pub struct MissionLoader;

impl MissionLoader {
    /// Load a mission file, picking the parser from its extension.
    pub fn load_from_file(path: &Path) -> MissionResult<LoadedMission> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        let format = DataFormat::from_file_name(file_name)?;

        let bytes = fs::read(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut loaded = Self::load_from_bytes(&bytes, format)?;
        loaded.source = Some(path.to_path_buf());
        Ok(loaded)
    }

    /// Parse an uploaded buffer whose format is already known.
    pub fn load_from_bytes(bytes: &[u8], format: DataFormat) -> MissionResult<LoadedMission> {
        let blocks = parse_mission(bytes, format)?;
        Ok(LoadedMission {
            blocks,
            format,
            source: None,
        })
    }

    /// Parse an uploaded buffer, picking the parser from the upload's file name.
    pub fn load_upload(file_name: &str, bytes: &[u8]) -> MissionResult<LoadedMission> {
        let format = DataFormat::from_file_name(file_name)?;
        Self::load_from_bytes(bytes, format)
    }
}
