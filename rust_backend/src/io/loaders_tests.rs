#[cfg(test)]
mod tests {
    use crate::config::ExportSettings;
    use crate::core::domain::MissionBlock;
    use crate::core::error::{ImportError, MissionError};
    use crate::io::export::{ExportArtifact, ExportBundle};
    use crate::io::loaders::MissionLoader;
    use crate::mission::MissionTable;
    use crate::parsing::DataFormat;
    use std::io::Write;
    use tempfile::{Builder, TempDir};

    /// Helper to create a temp file with the given suffix
    fn create_temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn sample_table() -> MissionTable {
        MissionTable::from_blocks(vec![
            MissionBlock::new("Contrat direct", 15u32, "contractualisation"),
            MissionBlock::new("Dépose véhicule", 25u32, "collecte"),
        ])
    }

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(DataFormat::from_file_name("m.csv").unwrap(), DataFormat::Csv);
        assert_eq!(DataFormat::from_file_name("M.JSON").unwrap(), DataFormat::Json);
        assert!(matches!(
            DataFormat::from_file_name("mission.xlsx"),
            Err(ImportError::UnsupportedFormat(_))
        ));
        assert!(DataFormat::from_file_name("csv").is_err());
    }

    #[test]
    fn test_load_csv_file() {
        let file = create_temp_file(".csv", "Nom,Temps,Catégorie\nPortail,5,contractualisation\n");
        let loaded = MissionLoader::load_from_file(file.path()).unwrap();

        assert_eq!(loaded.format, DataFormat::Csv);
        assert_eq!(loaded.blocks.len(), 1);
        assert_eq!(loaded.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_load_json_file() {
        let file = create_temp_file(
            ".json",
            r#"[{"Nom": "Portail", "Temps": 5, "Catégorie": "contractualisation"}]"#,
        );
        let loaded = MissionLoader::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.format, DataFormat::Json);
        assert_eq!(loaded.blocks[0].name, "Portail");
    }

    #[test]
    fn test_load_unsupported_extension() {
        let file = create_temp_file(".txt", "Nom,Temps,Catégorie\n");
        let err = MissionLoader::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, MissionError::Import(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = MissionLoader::load_from_file(std::path::Path::new("/nonexistent/m.csv")).unwrap_err();
        assert!(matches!(err, MissionError::Import(ImportError::Io { .. })));
    }

    #[test]
    fn test_load_upload_dispatches_on_name() {
        let loaded = MissionLoader::load_upload(
            "mission_sting.csv",
            "Nom,Temps,Catégorie\nA,1,x\n".as_bytes(),
        )
        .unwrap();
        assert_eq!(loaded.format, DataFormat::Csv);
        assert!(loaded.source.is_none());
    }

    #[test]
    fn test_export_artifacts() {
        let bundle = ExportBundle::build(&sample_table(), &ExportSettings::default()).unwrap();

        assert_eq!(bundle.csv.file_name, "mission_sting.csv");
        assert_eq!(bundle.csv.mime, "text/csv");
        assert_eq!(bundle.json.file_name, "mission_sting.json");
        assert_eq!(bundle.json.mime, "application/json");
        assert!(bundle
            .get(DataFormat::Csv)
            .as_text()
            .unwrap()
            .starts_with("Nom,Temps,Catégorie\n"));
    }

    #[test]
    fn test_export_then_reload_from_disk() {
        let dir = TempDir::new().unwrap();
        let settings = ExportSettings {
            file_stem: "essai".to_string(),
            json_indent: 2,
        };
        let bundle = ExportBundle::build(&sample_table(), &settings).unwrap();
        let paths = bundle.write_all(dir.path()).unwrap();

        assert_eq!(paths.len(), 2);
        for path in &paths {
            let loaded = MissionLoader::load_from_file(path).unwrap();
            assert_eq!(loaded.blocks, sample_table().blocks());
        }
    }

    #[test]
    fn test_artifact_text_for_binary_data() {
        let artifact = ExportArtifact::new("x", DataFormat::Csv, vec![0xff, 0xfe]);
        assert!(artifact.as_text().is_none());
    }
}
