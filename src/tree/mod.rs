//! Photo Tree
//!
//! Hierarchical view over flat photo records: path normalization, tree
//! folding, navigation, statistics rollup and structural fingerprinting.

pub mod builder;
pub mod hasher;
pub mod navigator;
pub mod node;
pub mod path;
pub mod stats;

pub use builder::{BuildReport, TreeBuilder, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
pub use navigator::{DirectoryContents, Resolved};
pub use node::{FileEntry, TreeNode};
pub use path::{BasePath, PathKey};
pub use stats::TreeStats;

use crate::store::PhotoRecord;
use crate::types::Hash;

/// A built tree together with the base it was built against.
///
/// Lookups reuse that base, so callers cannot accidentally navigate with a
/// different one.
#[derive(Debug, Clone)]
pub struct PhotoTree {
    root: TreeNode,
    base: BasePath,
    report: BuildReport,
}

impl PhotoTree {
    pub fn build<'a, I>(builder: &TreeBuilder, records: I) -> Self
    where
        I: IntoIterator<Item = &'a PhotoRecord>,
    {
        let (root, report) = builder.build(records);
        Self {
            root,
            base: builder.base().clone(),
            report,
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn base(&self) -> &BasePath {
        &self.base
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn resolve(&self, path: &str) -> Resolved<'_> {
        navigator::resolve(&self.root, path, &self.base)
    }

    pub fn directory_contents(&self, path: &str) -> Option<DirectoryContents<'_>> {
        navigator::directory_contents(&self.root, path, &self.base)
    }

    pub fn file_info(&self, path: &str) -> Option<&FileEntry> {
        navigator::file_info(&self.root, path, &self.base)
    }

    /// Statistics for the whole tree, or for the directory at `path`
    pub fn statistics(&self, path: Option<&str>) -> Option<TreeStats> {
        let node = match path {
            Some(path) => navigator::walk(&self.root, self.base.split(path).components())?,
            None => &self.root,
        };
        Some(stats::aggregate(node))
    }

    pub fn fingerprint(&self) -> Hash {
        hasher::fingerprint(&self.root)
    }
}
