use std::path::Path;

use rusqlite::{params_from_iter, Connection, Transaction};
use tracing::{debug, debug_span};

use super::schema::create_script;
use super::TableRow;
use crate::dataset::Dataset;
use crate::BuildError;

fn insert_rows<R: TableRow>(tx: &Transaction<'_>, rows: &[R]) -> Result<usize, BuildError> {
    let mut stmt = tx.prepare(R::INSERT)?;
    for row in rows {
        stmt.execute(params_from_iter(row.values()))?;
    }
    Ok(rows.len())
}

/// Replace the contents of `conn` with `dataset` in one transaction.
///
/// On any error the transaction is dropped without committing, which rolls
/// back every statement including the schema changes.
pub fn write_to_connection(conn: &mut Connection, dataset: &Dataset) -> Result<(), BuildError> {
    let _span = debug_span!("write_database").entered();

    let tx = conn.transaction()?;
    tx.execute_batch(&create_script(
        dataset.symbols.is_some(),
        dataset.emoji.is_some(),
    ))?;

    let n = insert_rows(&tx, &dataset.frequency)?;
    debug!(rows = n, "frequency");
    let n = insert_rows(&tx, &dataset.conversions)?;
    debug!(rows = n, "conversions");
    let n = insert_rows(&tx, &dataset.key_sequences)?;
    debug!(rows = n, "key_sequences");
    insert_rows(&tx, &dataset.syllables)?;
    if let Some(symbols) = &dataset.symbols {
        insert_rows(&tx, symbols)?;
    }
    if let Some(emoji) = &dataset.emoji {
        insert_rows(&tx, emoji)?;
    }

    tx.commit()?;
    Ok(())
}

/// Build `dataset` into the SQLite file at `path`, replacing any tables a
/// previous build left there.
pub fn write_database(path: &Path, dataset: &Dataset) -> Result<(), BuildError> {
    let mut conn = Connection::open(path)?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    write_to_connection(&mut conn, dataset)?;
    conn.execute_batch("VACUUM;")?;
    Ok(())
}
