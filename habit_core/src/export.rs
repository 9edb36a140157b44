//! CSV export of check-in history.
//!
//! Rows are written to a temp file next to the destination, synced, and
//! renamed into place, so a reader never sees a half-written export.

use crate::{Database, Error, Result, Store};
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    habit_id: u64,
    habit_name: &'a str,
    check_in_id: u64,
    date: String,
    notes: Option<&'a str>,
}

fn write_rows<W: std::io::Write>(db: &Database, writer: &mut csv::Writer<W>) -> Result<usize> {
    let mut count = 0;
    for habit in db.habits() {
        for check_in in &habit.check_ins {
            writer.serialize(CsvRow {
                habit_id: habit.id,
                habit_name: &habit.name,
                check_in_id: check_in.id,
                date: check_in.date.to_string(),
                notes: check_in.notes.as_deref(),
            })?;
            count += 1;
        }
    }
    Ok(count)
}

/// Export every check-in, grouped by habit in store order
///
/// Returns the number of rows written. The file always carries a header
/// row, even when there are no check-ins.
pub fn export_check_ins<S: Store>(store: &S, dest: &Path) -> Result<usize> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let temp = NamedTempFile::new_in(dir)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(temp.as_file());
    writer.write_record(["habit_id", "habit_name", "check_in_id", "date", "notes"])?;

    let count = store.read(|db| write_rows(db, &mut writer))?;

    writer.flush()?;
    drop(writer);
    temp.as_file().sync_all()?;
    temp.persist(dest).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Exported {} check-ins to {:?}", count, dest);
    Ok(count)
}
