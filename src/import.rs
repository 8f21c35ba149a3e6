//! Directory import
//!
//! Walks a photo directory and registers every image the store does not know
//! yet, queued for review. Known paths are never touched, so re-running an
//! import is safe. The directory is canonicalized first, so records always
//! carry absolute paths however the directory was named.

use crate::error::ApiError;
use crate::store::{PhotoRecord, RecordStore};
use crate::types::Status;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Outcome of one import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Image files found under the directory
    pub discovered: usize,
    /// New records written (or that would be, on a dry run)
    pub inserted: usize,
    /// Files already present in the store
    pub existing: usize,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

/// Case-insensitive match against extensions given without a dot
pub fn has_photo_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

fn modification_time(entry: &DirEntry) -> Option<NaiveDateTime> {
    let modified = entry.metadata().ok()?.modified().ok()?;
    Some(DateTime::<Utc>::from(modified).naive_utc())
}

/// Register new photos under `dir` with status `review`
pub fn import_directory(
    store: &dyn RecordStore,
    dir: &Path,
    extensions: &[String],
    dry_run: bool,
) -> Result<ImportReport, ApiError> {
    if !dir.is_dir() {
        return Err(ApiError::InvalidRequest(format!(
            "import directory does not exist: {}",
            dir.display()
        )));
    }
    let root = dunce::canonicalize(dir).map_err(|e| {
        ApiError::InvalidRequest(format!(
            "cannot resolve import directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let mut report = ImportReport::default();
    let walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_photo_extension(entry.path(), extensions) {
            continue;
        }
        let Some(path) = entry.path().to_str() else {
            warn!(path = %entry.path().display(), "Skipping non UTF-8 path");
            continue;
        };

        report.discovered += 1;
        if store.get(path)?.is_some() {
            report.existing += 1;
            continue;
        }

        report.inserted += 1;
        if dry_run {
            debug!(path, "Would import");
            continue;
        }
        let mut record = PhotoRecord::new(path).with_status(Status::Review);
        record.modification_date = modification_time(&entry);
        store.upsert(&record)?;
        debug!(path, "Imported");
    }

    if !dry_run {
        store.flush()?;
    }
    info!(
        dir = %root.display(),
        discovered = report.discovered,
        inserted = report.inserted,
        existing = report.existing,
        dry_run,
        "Import finished"
    );
    Ok(report)
}
