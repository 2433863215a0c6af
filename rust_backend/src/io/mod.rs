//! File-level import and export.
//!
//! This module wraps the parsers with file handling: picking a format from a
//! file name, reading uploads from disk, and packaging exports with the file
//! name and MIME type the front-end offers for download.
//!
//! # Example
//!
//! ```no_run
//! use sting_rust::io::loaders::MissionLoader;
//! use std::path::Path;
//!
//! let loaded = MissionLoader::load_from_file(Path::new("mission_sting.json"))
//!     .expect("Failed to load");
//! println!("Loaded {} blocks", loaded.blocks.len());
//! ```

pub mod export;
pub mod loaders;

#[cfg(test)]
mod loaders_tests;

pub use export::{ExportArtifact, ExportBundle};
pub use loaders::{LoadedMission, MissionLoader};
