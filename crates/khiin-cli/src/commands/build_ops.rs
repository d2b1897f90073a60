use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use khiin_core::dataset::source::InputFiles;
use khiin_core::dataset::{build as build_dataset, BuildOptions, Dataset};
use khiin_core::db::{script, write_database};
use khiin_core::settings::{parse_settings_toml, Settings};
use khiin_core::BuildError;

/// Everything the `build` command was asked to do.
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    pub inputs: InputFiles,
    pub options: BuildOptions,
    /// SQL script output.
    pub output: Option<PathBuf>,
    /// SQLite database output.
    pub db: Option<PathBuf>,
    /// Custom settings TOML; the embedded defaults otherwise.
    pub settings: Option<PathBuf>,
}

fn load_settings(path: Option<&Path>) -> Result<Settings, BuildError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Ok(parse_settings_toml(&content)?)
        }
        None => Ok(Settings::default()),
    }
}

/// Run the build and write every requested output.
pub fn run(req: &BuildRequest) -> Result<Dataset, BuildError> {
    let settings = load_settings(req.settings.as_deref())?;
    let raw = req.inputs.load()?;
    let dataset = build_dataset(raw, &req.options, &settings)?;

    if let Some(path) = &req.output {
        script::save_script(path, &dataset)?;
    }
    if let Some(path) = &req.db {
        write_database(path, &dataset)?;
    }
    Ok(dataset)
}

pub fn build(req: &BuildRequest) {
    if req.output.is_none() && req.db.is_none() {
        eprintln!("Error: nothing to write (use --output and/or --db)");
        process::exit(1);
    }

    eprintln!("Building database, please wait...");
    let dataset = die!(run(req), "Error building database: {}");

    for path in req.output.iter().chain(req.db.iter()) {
        eprintln!("Output written to {}", path.display());
    }
    eprintln!(
        " - {} inputs (\"frequency\" table)",
        dataset.frequency.len()
    );
    eprintln!(
        " - {} tokens (\"conversions\" table)",
        dataset.conversions.len()
    );
    eprintln!(
        " - {} key sequences (\"key_sequences\" table)",
        dataset.key_sequences.len()
    );
    eprintln!(
        " - {} syllables (\"syllables\" table)",
        dataset.syllables.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_run_writes_both_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let frequencies = write(
            dir.path(),
            "freq.csv",
            "input,freq,chhan_id\nmá,10,1\nê,30,2\nbô,5,3\n",
        );
        let conversions = write(
            dir.path(),
            "conv.csv",
            "input,output,weight,color,hint\nmá,媽,1000,,\nê,的,1000,,\n",
        );
        let syllables = write(dir.path(), "syls.txt", "ma\nbo\n");

        let req = BuildRequest {
            inputs: InputFiles {
                frequencies,
                conversions,
                syllables: Some(syllables),
                ..Default::default()
            },
            options: BuildOptions::default(),
            output: Some(dir.path().join("khiin.sql")),
            db: Some(dir.path().join("khiin.db")),
            settings: None,
        };

        let dataset = run(&req).unwrap();
        assert_eq!(dataset.frequency.len(), 2);
        assert_eq!(dataset.syllables.len(), 2);

        let sql = fs::read_to_string(dir.path().join("khiin.sql")).unwrap();
        assert!(sql.contains("'媽'"));
        assert!(dir.path().join("khiin.db").exists());
    }

    #[test]
    fn test_run_reports_bad_settings() {
        let dir = tempfile::tempdir().unwrap();
        let settings = write(dir.path(), "settings.toml", "[weights]\nhanji = 1\n");
        let req = BuildRequest {
            settings: Some(settings),
            ..Default::default()
        };
        let err = run(&req).unwrap_err();
        assert!(matches!(err, BuildError::Settings(_)));
    }

    #[test]
    fn test_run_reports_missing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let req = BuildRequest {
            inputs: InputFiles {
                frequencies: write(dir.path(), "freq.csv", "input,freq\nmá,10\n"),
                conversions: write(dir.path(), "conv.csv", "input,output,weight\nmá,媽,1\n"),
                ..Default::default()
            },
            output: Some(dir.path().join("khiin.sql")),
            ..Default::default()
        };
        let err = run(&req).unwrap_err();
        assert!(matches!(err, BuildError::DataFormat { .. }));
        assert!(!dir.path().join("khiin.sql").exists());
    }
}
