//! Journal file ingestion driver
//!
//! Feeds journal files to the pipeline strictly in arrival order: files by
//! name (the journal names files by start time), lines by position. The
//! decode core never touches the filesystem; side-car merges and duplicate
//! file detection happen here.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::io::AsyncBufReadExt;
use tracing::{debug, info, warn};

use starlog_common::checksum;
use starlog_journal::{DecodedEvent, Pipeline};

/// Poll interval for `--follow` tail mode.
const FOLLOW_POLL: Duration = Duration::from_millis(500);

/// Journal files under `path`, in ingestion order.
///
/// A file is ingested as itself; a directory contributes its `*.log` files
/// sorted by name.
pub fn discover_journals(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(path)
        .with_context(|| format!("Failed to read directory: {}", path.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .collect();
    files.sort();

    Ok(files)
}

/// Ingest every journal under `path` into the pipeline, invoking `emit` for
/// each decoded event (side-car merges included).
///
/// Files whose checksum was already processed in this run are skipped;
/// commanders copy journal directories around and duplicates are common.
pub async fn ingest_path(
    pipeline: &mut Pipeline,
    path: &Path,
    follow: bool,
    emit: &mut dyn FnMut(&DecodedEvent),
) -> Result<()> {
    let files = discover_journals(path)?;
    if files.is_empty() {
        warn!(path = %path.display(), "no journal files found");
        return Ok(());
    }

    let mut seen = HashSet::new();
    let last_index = files.len() - 1;

    for (index, file) in files.iter().enumerate() {
        let identity = checksum::file_checksum(file)
            .with_context(|| format!("Failed to checksum {}", file.display()))?;
        if !seen.insert(identity) {
            info!(file = %file.display(), "duplicate journal file skipped");
            continue;
        }

        // only the newest file can still be growing
        let tail = follow && index == last_index;
        ingest_file(pipeline, file, tail, emit).await?;
    }

    Ok(())
}

/// Ingest one journal file line by line.
async fn ingest_file(
    pipeline: &mut Pipeline,
    path: &Path,
    follow: bool,
    emit: &mut dyn FnMut(&DecodedEvent),
) -> Result<()> {
    debug!(file = %path.display(), follow, "ingesting journal file");

    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open journal: {}", path.display()))?;
    let mut reader = tokio::io::BufReader::new(file);
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .context("Failed to read journal line")?;

        if bytes_read == 0 {
            if follow {
                tokio::time::sleep(FOLLOW_POLL).await;
                continue;
            }
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match pipeline.ingest_line(trimmed) {
            Ok(event) => {
                emit(&event);
                if let Some(sidecar) = event.payload.sidecar_file() {
                    merge_sidecar(pipeline, path, sidecar, emit).await;
                }
            },
            // one damaged record never stops the rest of the history
            Err(error) => warn!(%error, file = %path.display(), "historical entry skipped"),
        }
    }

    Ok(())
}

/// Read a companion file next to the journal and feed it through the same
/// decode path. A missing side-car is normal for current-format journals.
async fn merge_sidecar(
    pipeline: &mut Pipeline,
    journal: &Path,
    sidecar: &str,
    emit: &mut dyn FnMut(&DecodedEvent),
) {
    let path = journal.parent().unwrap_or(Path::new(".")).join(sidecar);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(error) => {
            debug!(%error, file = %path.display(), "side-car not available");
            return;
        },
    };

    let value: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, file = %path.display(), "side-car is not valid JSON");
            return;
        },
    };

    match pipeline.ingest_value(value) {
        Ok(event) => {
            info!(file = %path.display(), "side-car state merged");
            emit(&event);
        },
        Err(error) => warn!(%error, file = %path.display(), "side-car record rejected"),
    }
}
