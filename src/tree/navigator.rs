//! Tree Navigator
//!
//! Resolves paths against a built tree. A miss is an ordinary outcome, so
//! every lookup returns `Option` or `Resolved::NotFound` rather than an error.

use crate::tree::node::{FileEntry, TreeNode};
use crate::tree::path::BasePath;
use serde::Serialize;

/// Outcome of resolving a path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Directory(&'a TreeNode),
    File(&'a FileEntry),
    NotFound,
}

/// Direct contents of one directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryContents<'a> {
    pub files: &'a [FileEntry],
    pub directories: Vec<&'a str>,
}

/// Walk `components` down from `root`, stopping at the first missing child
pub fn walk<'a, S: AsRef<str>>(root: &'a TreeNode, components: &[S]) -> Option<&'a TreeNode> {
    let mut current = root;
    for component in components {
        current = current.child(component.as_ref())?;
    }
    Some(current)
}

/// Resolve `path` to a directory or a file.
///
/// When the full path names a directory it wins over a file of the same name
/// in the parent, since both can legitimately exist.
pub fn resolve<'a>(root: &'a TreeNode, path: &str, base: &BasePath) -> Resolved<'a> {
    let key = base.split(path);
    if let Some(node) = walk(root, key.components()) {
        return Resolved::Directory(node);
    }
    match file_in(root, key.parent(), key.leaf()) {
        Some(entry) => Resolved::File(entry),
        None => Resolved::NotFound,
    }
}

/// Direct files and child directory names of the directory at `path`
pub fn directory_contents<'a>(
    root: &'a TreeNode,
    path: &str,
    base: &BasePath,
) -> Option<DirectoryContents<'a>> {
    let key = base.split(path);
    walk(root, key.components()).map(|node| DirectoryContents {
        files: node.files(),
        directories: node.directory_names(),
    })
}

/// File entry stored at `path`.
///
/// Resolves the parent directory, then scans its files by leaf name.
pub fn file_info<'a>(root: &'a TreeNode, path: &str, base: &BasePath) -> Option<&'a FileEntry> {
    let key = base.split(path);
    file_in(root, key.parent(), key.leaf())
}

fn file_in<'a>(
    root: &'a TreeNode,
    parent: &[String],
    leaf: Option<&str>,
) -> Option<&'a FileEntry> {
    let leaf = leaf?;
    walk(root, parent)?.file(leaf)
}
