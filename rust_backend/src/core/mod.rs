//! Core domain models for mission planning.
//!
//! This module defines the fundamental data structures used throughout the Sting
//! mission simulator: the catalog of available task blocks, the blocks selected
//! into a mission, and the error types shared by every layer.

pub mod catalog;
pub mod domain;
pub mod error;

pub use catalog::{get_sting_catalog, Catalog};
pub use domain::{
    BlockDefinition, BlockTime, CategoryTotal, MissionBlock, COLUMN_CATEGORY, COLUMN_NAME,
    COLUMN_TIME, REQUIRED_COLUMNS,
};
pub use error::{ImportError, MissionError, MissionResult};
