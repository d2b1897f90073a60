use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::debug_span;

use super::schema::{bind, create_script};
use super::TableRow;
use crate::dataset::Dataset;
use crate::BuildError;

fn write_rows<W: Write, R: TableRow>(out: &mut W, rows: &[R]) -> io::Result<()> {
    for row in rows {
        writeln!(out, "{}", bind(R::INSERT, &row.values()))?;
    }
    Ok(())
}

/// Write the whole build as one SQL script. Everything, DDL included, runs
/// inside a single transaction, so a failing statement leaves the target
/// database untouched.
pub fn write_script<W: Write>(out: &mut W, dataset: &Dataset) -> Result<(), BuildError> {
    let _span = debug_span!("write_script").entered();

    writeln!(out, "BEGIN TRANSACTION;")?;
    out.write_all(create_script(dataset.symbols.is_some(), dataset.emoji.is_some()).as_bytes())?;
    writeln!(out)?;

    write_rows(out, &dataset.frequency)?;
    write_rows(out, &dataset.conversions)?;
    write_rows(out, &dataset.key_sequences)?;
    write_rows(out, &dataset.syllables)?;
    if let Some(symbols) = &dataset.symbols {
        write_rows(out, symbols)?;
    }
    if let Some(emoji) = &dataset.emoji {
        write_rows(out, emoji)?;
    }

    writeln!(out, "COMMIT;")?;
    Ok(())
}

/// Atomic write: write to .tmp then rename.
pub fn save_script(path: &Path, dataset: &Dataset) -> Result<(), BuildError> {
    let mut buf = Vec::new();
    write_script(&mut buf, dataset)?;

    let tmp = path.with_extension("tmp");
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&tmp, &buf)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;
    use crate::dataset::{ConversionRow, FrequencyRow, KeySequenceRow, SyllableRow};

    fn sample() -> Dataset {
        Dataset {
            frequency: vec![FrequencyRow {
                id: 1,
                input: "m'á".into(),
                freq: 10,
                priority: 1,
            }],
            conversions: vec![ConversionRow {
                input_id: 1,
                output: "it's \"quoted\"; --".into(),
                weight: 1000,
                category: None,
                annotation: Some("a'b".into()),
            }],
            key_sequences: vec![KeySequenceRow {
                input_id: 1,
                numeric: "ma2".into(),
                telex: "mas".into(),
                n_syls: 1,
                fuzzy_tone: false,
                p: 0.25,
            }],
            syllables: vec![SyllableRow { input: "ma".into() }],
            symbols: None,
            emoji: None,
        }
    }

    #[test]
    fn test_script_executes_and_keeps_values_intact() {
        let mut buf = Vec::new();
        write_script(&mut buf, &sample()).unwrap();
        let sql = String::from_utf8(buf).unwrap();
        assert!(sql.starts_with("BEGIN TRANSACTION;"));
        assert!(sql.trim_end().ends_with("COMMIT;"));

        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(&sql).unwrap();

        let (output, annotation): (String, String) = conn
            .query_row(
                r#"SELECT "output", "annotation" FROM "conversions""#,
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(output, "it's \"quoted\"; --");
        assert_eq!(annotation, "a'b");

        let (input, numeric, p): (String, String, f64) = conn
            .query_row(
                r#"SELECT "input", "numeric", "p" FROM "conversion_lookups""#,
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert_eq!(input, "m'á");
        assert_eq!(numeric, "ma2");
        assert!((p - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_save_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("khiin.sql");
        save_script(&path, &sample()).unwrap();
        let sql = fs::read_to_string(&path).unwrap();
        assert!(sql.contains(r#"INSERT INTO "syllables" ("input") VALUES ('ma');"#));
        assert!(!path.with_extension("tmp").exists());
    }
}
