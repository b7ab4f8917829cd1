use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use coaster_common::{VideoRow, VIDEO_COASTER_COLUMN};

/// Append rows to the video file, writing the header only when the file is
/// missing or empty. The file is flushed before returning so every call is a
/// checkpoint.
pub fn append_video_rows(path: &Path, rows: &[VideoRow]) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }

    let write_header = std::fs::metadata(path)
        .map(|meta| meta.len() == 0)
        .unwrap_or(true);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

/// Cleaned coaster titles already present in the video file. A missing or
/// unreadable file yields an empty set.
pub fn load_processed(path: &Path) -> HashSet<String> {
    if !path.exists() {
        return HashSet::new();
    }

    match read_processed(path) {
        Ok(processed) => {
            info!(path = %path.display(), count = processed.len(), "Resume enabled");
            processed
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read existing video file, starting fresh");
            HashSet::new()
        }
    }
}

fn read_processed(path: &Path) -> Result<HashSet<String>> {
    let mut reader = csv::Reader::from_path(path)?;
    let column = reader
        .headers()?
        .iter()
        .position(|h| h == VIDEO_COASTER_COLUMN)
        .with_context(|| format!("No {VIDEO_COASTER_COLUMN} column"))?;

    let mut processed = HashSet::new();
    for record in reader.records() {
        let record = record?;
        if let Some(title) = record.get(column).map(str::trim).filter(|t| !t.is_empty()) {
            processed.insert(title.to_string());
        }
    }
    Ok(processed)
}
