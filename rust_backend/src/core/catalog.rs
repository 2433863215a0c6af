//! Catalog of task blocks that can be added to a mission.
//!
//! The built-in Sting catalog is lazily initialized on first access and shared
//! for the lifetime of the process. A custom catalog can replace it through the
//! configuration file.
//!
//! # Usage
//!
//! ```
//! use sting_rust::core::catalog::Catalog;
//!
//! let catalog = Catalog::sting();
//! let portail = catalog.lookup("Portail").unwrap();
//! assert_eq!(portail.default_duration, 5);
//! ```

use once_cell::sync::Lazy;

use super::domain::BlockDefinition;
use super::error::{MissionError, MissionResult};
use crate::mission::MissionTable;

/// Returns the built-in Sting catalog, in declaration order.
pub fn get_sting_catalog() -> &'static [BlockDefinition] {
    static CATALOG: Lazy<Vec<BlockDefinition>> = Lazy::new(build_sting_catalog);
    &CATALOG
}

fn build_sting_catalog() -> Vec<BlockDefinition> {
    let entry = BlockDefinition::new;
    vec![
        entry("Contrat direct", 15, "contractualisation"),
        entry("Portail", 5, "contractualisation"),
        entry("Prise en charge véhicule", 30, "collecte"),
        entry("Dépose véhicule", 25, "collecte"),
        entry("Départ en journée", 20, "collecte"),
        entry("Ouvrir la mission", 10, "collecte"),
        entry("Collecte alimentaire froid", 45, "collecte"),
        entry("Contrôle sans manipulations", 35, "controle"),
        entry("Livraison température positif", 40, "livraison"),
    ]
}

/// Immutable, ordered menu of block definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<BlockDefinition>,
}

impl Catalog {
    /// The built-in Sting catalog.
    pub fn sting() -> Self {
        Self {
            entries: get_sting_catalog().to_vec(),
        }
    }

    /// Build a custom catalog.
    ///
    /// Entries must have a non-empty name and a positive default duration.
    /// Repeated names are accepted; [`Catalog::lookup`] returns the first one.
    pub fn new(entries: Vec<BlockDefinition>) -> MissionResult<Self> {
        for (i, def) in entries.iter().enumerate() {
            if def.name.trim().is_empty() {
                return Err(MissionError::InvalidCatalog(format!(
                    "entry {} has an empty name",
                    i
                )));
            }
            if def.default_duration == 0 {
                return Err(MissionError::InvalidCatalog(format!(
                    "entry '{}' has a zero default duration",
                    def.name
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[BlockDefinition] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All catalog names in declaration order.
    pub fn list_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Find the definition registered under `name`.
    pub fn lookup(&self, name: &str) -> MissionResult<&BlockDefinition> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| MissionError::NotFound(name.to_string()))
    }

    /// Names that can still be added to `table`, in declaration order.
    pub fn available_names(&self, table: &MissionTable) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.name.as_str())
            .filter(|name| !table.contains(name))
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for e in &self.entries {
            if !seen.contains(&e.category.as_str()) {
                seen.push(&e.category);
            }
        }
        seen
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::sting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_every_name() {
        let catalog = Catalog::sting();
        for name in catalog.list_names() {
            assert_eq!(catalog.lookup(name).unwrap().name, name);
        }
    }

    #[test]
    fn test_lookup_missing_name() {
        let catalog = Catalog::sting();
        let err = catalog.lookup("Téléportation").unwrap_err();
        assert!(matches!(err, MissionError::NotFound(ref n) if n == "Téléportation"));
    }

    #[test]
    fn test_declaration_order() {
        let catalog = Catalog::sting();
        let names = catalog.list_names();
        assert_eq!(names.len(), 9);
        assert_eq!(names[0], "Contrat direct");
        assert_eq!(names[8], "Livraison température positif");
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(
            Catalog::sting().categories(),
            vec!["contractualisation", "collecte", "controle", "livraison"]
        );
    }

    #[test]
    fn test_duplicate_names_first_match_wins() {
        let catalog = Catalog::new(vec![
            BlockDefinition::new("A", 10, "first"),
            BlockDefinition::new("A", 20, "second"),
        ])
        .unwrap();
        assert_eq!(catalog.lookup("A").unwrap().category, "first");
    }

    #[test]
    fn test_rejects_invalid_entries() {
        assert!(matches!(
            Catalog::new(vec![BlockDefinition::new("A", 0, "x")]),
            Err(MissionError::InvalidCatalog(_))
        ));
        assert!(matches!(
            Catalog::new(vec![BlockDefinition::new("  ", 3, "x")]),
            Err(MissionError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_available_names_excludes_selected() {
        let catalog = Catalog::sting();
        let mut table = MissionTable::new();
        table.add(&catalog, "Portail").unwrap();

        let available = catalog.available_names(&table);
        assert_eq!(available.len(), 8);
        assert!(!available.contains(&"Portail"));
        assert_eq!(available[0], "Contrat direct");
    }
}
