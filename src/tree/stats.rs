//! Statistics Aggregator
//!
//! Post-order rollup of file counts over a subtree. The same routine serves
//! whole-tree statistics (called on the root) and folder statistics (called
//! on any resolved directory).

use crate::tree::node::TreeNode;
use crate::types::StatusCounts;
use serde::Serialize;

/// Rolled-up counts for a subtree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub total_files: u64,
    pub nude_files: u64,
    pub face_files: u64,
    pub by_status: StatusCounts,
    /// Descendant directories, not counting the node itself
    pub directories: u64,
}

impl TreeStats {
    /// Counts over the node's own files only
    pub fn local(node: &TreeNode) -> Self {
        let mut stats = TreeStats::default();
        for entry in node.files() {
            stats.total_files += 1;
            if entry.is_nude() {
                stats.nude_files += 1;
            }
            if entry.has_face() {
                stats.face_files += 1;
            }
            stats.by_status.increment(entry.status.as_ref());
        }
        stats
    }

    /// Fold a child directory's rollup into this one
    pub fn absorb_child(&mut self, child: &TreeStats) {
        self.total_files += child.total_files;
        self.nude_files += child.nude_files;
        self.face_files += child.face_files;
        self.by_status.merge(&child.by_status);
        self.directories += 1 + child.directories;
    }
}

/// Aggregate statistics for the subtree rooted at `node`
pub fn aggregate(node: &TreeNode) -> TreeStats {
    let mut stats = TreeStats::local(node);
    for (_, child) in node.children() {
        stats.absorb_child(&aggregate(child));
    }
    stats
}
