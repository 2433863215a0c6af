#[cfg(test)]
mod tests {
    use crate::core::domain::{BlockDefinition, BlockTime, CategoryTotal, MissionBlock};
    use crate::core::{Catalog, MissionError};
    use crate::mission::MissionTable;
    use crate::parsing::DataFormat;
    use serde_json::json;

    fn block(name: &str, minutes: u32, category: &str) -> MissionBlock {
        MissionBlock::new(name, minutes, category)
    }

    fn abc_table() -> MissionTable {
        MissionTable::from_blocks(vec![
            block("A", 10, "cat1"),
            block("B", 20, "cat2"),
            block("C", 5, "cat1"),
        ])
    }

    fn totals(pairs: &[(&str, u64)]) -> Vec<CategoryTotal> {
        pairs
            .iter()
            .map(|(category, minutes)| CategoryTotal {
                category: category.to_string(),
                minutes: *minutes,
            })
            .collect()
    }

    #[test]
    fn test_add_uses_catalog_default() {
        let catalog = Catalog::sting();
        let mut table = MissionTable::new();

        let index = table.add(&catalog, "Dépose véhicule").unwrap();
        assert_eq!(index, 0);
        assert_eq!(table.get(0), Some(&block("Dépose véhicule", 25, "collecte")));
    }

    #[test]
    fn test_add_twice_is_rejected() {
        let catalog = Catalog::sting();
        let mut table = MissionTable::new();

        table.add(&catalog, "Portail").unwrap();
        let err = table.add(&catalog, "Portail").unwrap_err();

        assert!(matches!(err, MissionError::DuplicateBlock(ref n) if n == "Portail"));
        assert!(err.is_user_warning());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_add_unknown_name() {
        let mut table = MissionTable::new();
        let err = table.add(&Catalog::sting(), "Inconnu").unwrap_err();
        assert!(matches!(err, MissionError::NotFound(_)));
        assert!(table.is_empty());
    }

    #[test]
    fn test_add_checks_duplicates_before_catalog() {
        // A trusted import may bring in names the catalog does not know.
        let mut table = MissionTable::from_blocks(vec![block("Hors catalogue", 3, "x")]);
        let err = table.add(&Catalog::sting(), "Hors catalogue").unwrap_err();
        assert!(matches!(err, MissionError::DuplicateBlock(_)));
    }

    #[test]
    fn test_edited_duration_is_independent_of_catalog() {
        let catalog = Catalog::new(vec![BlockDefinition::new("A", 10, "x")]).unwrap();
        let mut table = MissionTable::new();
        table.add(&catalog, "A").unwrap();
        table.update_duration(0, 99u32).unwrap();

        assert_eq!(catalog.lookup("A").unwrap().default_duration, 10);
        assert_eq!(table.get(0).unwrap().minutes(), 99);
    }

    #[test]
    fn test_remove_compacts_indices() {
        let mut table = abc_table();
        let removed = table.remove(1).unwrap();

        assert_eq!(removed.name, "B");
        assert_eq!(table.blocks(), &[block("A", 10, "cat1"), block("C", 5, "cat1")]);
        assert_eq!(table.position("C"), Some(1));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut table = abc_table();
        let err = table.remove(3).unwrap_err();
        assert!(matches!(err, MissionError::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_update_duration_in_place() {
        let mut table = abc_table();
        assert_eq!(table.update_duration(2, 40i64).unwrap(), 40);
        assert_eq!(table.get(2), Some(&block("C", 40, "cat1")));
        assert_eq!(table.get(0), Some(&block("A", 10, "cat1")));
    }

    #[test]
    fn test_update_duration_sanitizes_bad_values() {
        let mut table = abc_table();
        assert_eq!(table.update_duration(0, "abc").unwrap(), 0);
        assert_eq!(table.update_duration(1, -5i64).unwrap(), 0);
        assert_eq!(table.update_duration(2, "7").unwrap(), 7);

        assert_eq!(table.get(0).unwrap().duration, BlockTime::Minutes(0));
        assert_eq!(table.get(1).unwrap().duration, BlockTime::Minutes(0));
        assert_eq!(table.total_duration(), 7);
    }

    #[test]
    fn test_update_duration_out_of_range() {
        let mut table = MissionTable::new();
        let err = table.update_duration(0, 5u32).unwrap_err();
        assert!(matches!(err, MissionError::IndexOutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn test_aggregate_by_category() {
        let mut table = abc_table();
        assert_eq!(
            table.aggregate_by_category(),
            totals(&[("cat1", 15), ("cat2", 20)])
        );
    }

    #[test]
    fn test_aggregate_keeps_category_spelling() {
        let mut table = MissionTable::from_blocks(vec![
            block("A", 1, "Collecte"),
            block("B", 2, "collecte"),
            block("C", 4, "collecte "),
        ]);
        assert_eq!(table.aggregate_by_category().len(), 3);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(MissionTable::new().aggregate_by_category().is_empty());
    }

    #[test]
    fn test_total_duration() {
        let catalog = Catalog::sting();
        let mut table = MissionTable::new();
        assert_eq!(table.total_duration(), 0);

        for name in ["Contrat direct", "Portail", "Prise en charge véhicule"] {
            table.add(&catalog, name).unwrap();
        }
        assert_eq!(table.total_duration(), 50);
    }

    #[test]
    fn test_pending_durations_sanitized_on_total() {
        let mut table = MissionTable::from_blocks(vec![
            MissionBlock::new("A", json!("abc"), "x"),
            MissionBlock::new("B", json!("12"), "x"),
            MissionBlock::new("C", json!(null), "y"),
        ]);
        assert!(table.get(0).unwrap().duration.is_pending());

        assert_eq!(table.total_duration(), 12);
        assert!(table.iter().all(|b| !b.duration.is_pending()));
        assert_eq!(table.get(0).unwrap().duration, BlockTime::Minutes(0));
        assert_eq!(table.sanitize(), 0);
    }

    #[test]
    fn test_pending_durations_sanitized_on_aggregate() {
        let mut table = MissionTable::from_blocks(vec![
            MissionBlock::new("A", json!(-5), "x"),
            MissionBlock::new("B", json!(8), "x"),
        ]);
        assert_eq!(table.aggregate_by_category(), totals(&[("x", 8)]));
        assert_eq!(table.get(0).unwrap().duration, BlockTime::Minutes(0));
    }

    #[test]
    fn test_serialize_both_formats() {
        let table = abc_table();
        let out = table.serialize().unwrap();

        assert_eq!(
            String::from_utf8(out.csv).unwrap(),
            "Nom,Temps,Catégorie\nA,10,cat1\nB,20,cat2\nC,5,cat1\n"
        );
        assert!(out.json.starts_with("[\n  {\n    \"Nom\": \"A\",\n    \"Temps\": 10,"));
    }

    #[test]
    fn test_deserialize_replaces_table() {
        let mut table = abc_table();
        let count = table
            .deserialize(b"Nom,Temps,Cat\xc3\xa9gorie\nZ,3,cat9\n", DataFormat::Csv)
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(table.blocks(), &[block("Z", 3, "cat9")]);
    }

    #[test]
    fn test_imported_cells_stay_raw_until_totals() {
        let mut table = MissionTable::new();
        table
            .deserialize("Nom,Temps,Catégorie\nA,abc,x\nB,-4,x\nC,7,y\n".as_bytes(), DataFormat::Csv)
            .unwrap();

        assert_eq!(table.get(0).unwrap().duration, BlockTime::Pending(json!("abc")));
        assert_eq!(table.get(1).unwrap().duration, BlockTime::Pending(json!("-4")));
        assert_eq!(table.get(2).unwrap().duration, BlockTime::Minutes(7));

        let raw = table.serialize().unwrap();
        assert_eq!(
            String::from_utf8(raw.csv).unwrap(),
            "Nom,Temps,Catégorie\nA,abc,x\nB,-4,x\nC,7,y\n"
        );
        assert!(raw.json.contains("\"Temps\": \"abc\""));

        assert_eq!(table.total_duration(), 7);
        assert_eq!(table.get(0).unwrap().duration, BlockTime::Minutes(0));
        assert_eq!(
            String::from_utf8(table.serialize().unwrap().csv).unwrap(),
            "Nom,Temps,Catégorie\nA,0,x\nB,0,x\nC,7,y\n"
        );
    }

    #[test]
    fn test_deserialize_accepts_short_rows() {
        let mut table = abc_table();
        let count = table
            .deserialize("Nom,Temps,Catégorie\nPortail,5\nA,3,x\n".as_bytes(), DataFormat::Csv)
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(table.blocks(), &[block("Portail", 5, ""), block("A", 3, "x")]);
    }

    #[test]
    fn test_deserialize_allows_duplicate_names() {
        let mut table = MissionTable::new();
        let json = r#"[
            {"Nom": "A", "Temps": 1, "Catégorie": "x"},
            {"Nom": "A", "Temps": 2, "Catégorie": "y"}
        ]"#;
        table.deserialize(json.as_bytes(), DataFormat::Json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.position("A"), Some(0));
    }

    #[test]
    fn test_failed_deserialize_leaves_table_unchanged() {
        let mut table = abc_table();
        let before = table.clone();

        let schema = table
            .deserialize(b"Nom,Temps\nZ,3\n", DataFormat::Csv)
            .unwrap_err();
        assert!(matches!(schema, MissionError::Schema { ref missing } if missing == &["Catégorie"]));

        let parse = table.deserialize(b"[{", DataFormat::Json).unwrap_err();
        assert!(matches!(parse, MissionError::Import(_)));

        assert_eq!(table, before);
    }

    #[test]
    fn test_json_round_trip() {
        let mut table = abc_table();
        let json = table.serialize().unwrap().json;

        let mut restored = MissionTable::new();
        restored.deserialize(json.as_bytes(), DataFormat::Json).unwrap();
        assert_eq!(restored, table);

        // Totals survive too.
        assert_eq!(restored.total_duration(), table.total_duration());
    }
}
