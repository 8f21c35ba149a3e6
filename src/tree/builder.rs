//! Tree Builder
//!
//! Folds flat photo records into a directory tree. Every component but the
//! last becomes a directory, created lazily on first use; the last component
//! becomes a file entry appended to that directory.

use crate::store::PhotoRecord;
use crate::tree::node::{FileEntry, TreeNode};
use crate::tree::path::BasePath;
use serde::Serialize;
use tracing::{debug, warn};

/// Default limit on directory nesting below the base path
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Upper bound on any configured depth; traversals recurse once per level
pub const MAX_DEPTH_LIMIT: usize = 4096;

/// Counters collected while folding records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub records_seen: usize,
    pub files_inserted: usize,
    /// Records whose path was empty after normalization and base stripping
    pub skipped_empty: usize,
    /// Records nested deeper than the configured limit
    pub skipped_too_deep: usize,
}

impl BuildReport {
    pub fn skipped(&self) -> usize {
        self.skipped_empty + self.skipped_too_deep
    }
}

/// Builds trees relative to a fixed base path
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    base: BasePath,
    max_depth: usize,
}

impl TreeBuilder {
    pub fn new(base: &str) -> Self {
        Self {
            base: BasePath::new(base),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the nesting limit, clamped to `MAX_DEPTH_LIMIT`
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }

    pub fn base(&self) -> &BasePath {
        &self.base
    }

    /// Fold `records` into a fresh tree.
    ///
    /// Malformed records are skipped and counted, never fatal. Input order
    /// fully determines file order and child order.
    pub fn build<'a, I>(&self, records: I) -> (TreeNode, BuildReport)
    where
        I: IntoIterator<Item = &'a PhotoRecord>,
    {
        let mut root = TreeNode::new();
        let mut report = BuildReport::default();

        for record in records {
            report.records_seen += 1;
            let key = self.base.split(&record.path);

            let Some(name) = key.leaf() else {
                warn!(path = %record.path, "Skipping record with empty path after normalization");
                report.skipped_empty += 1;
                continue;
            };

            let dirs = key.parent();
            if dirs.len() > self.max_depth {
                warn!(
                    path = %record.path,
                    depth = dirs.len(),
                    max_depth = self.max_depth,
                    "Skipping record nested beyond depth limit"
                );
                report.skipped_too_deep += 1;
                continue;
            }

            let mut current = &mut root;
            for dir in dirs {
                current = current.child_or_insert(dir);
            }
            current.push_file(FileEntry::from_record(record, name.to_string()));
            report.files_inserted += 1;
        }

        debug!(
            records = report.records_seen,
            inserted = report.files_inserted,
            skipped = report.skipped(),
            "Tree built"
        );
        (root, report)
    }
}

/// Build a tree from `records` relative to `base` with default limits
pub fn build(records: &[PhotoRecord], base: &str) -> TreeNode {
    TreeBuilder::new(base).build(records).0
}
