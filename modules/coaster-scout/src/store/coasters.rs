use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use coaster_common::{coaster_columns, CoasterRecord, CoasterRow};

/// Overwrite `path` with a header of `title` plus every semantic field, then
/// one record per row. The header is written even when `rows` is empty.
pub fn write_coaster_rows(path: &Path, rows: &[CoasterRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(coaster_columns())?;
    for row in rows {
        writer.write_record(row.to_record())?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    info!(path = %path.display(), rows = rows.len(), "Saved coaster rows");
    Ok(())
}

/// Read up to `max` coasters from a file written by [`write_coaster_rows`].
/// Only `title`, `park`, `location` and `country` are read.
pub fn read_coaster_records(path: &Path, max: usize) -> Result<Vec<CoasterRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    reader
        .deserialize::<CoasterRecord>()
        .take(max)
        .map(|record| record.with_context(|| format!("Malformed row in {}", path.display())))
        .collect()
}
