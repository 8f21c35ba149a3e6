//! Tree node types

use crate::store::PhotoRecord;
use crate::types::Status;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// File leaf: one photo's path and classification flags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub is_nude: Option<bool>,
    pub has_face: Option<bool>,
    pub status: Option<Status>,
    pub nsfw_score: Option<f32>,
    /// Leaf name of `path`, used for lookups inside a directory
    #[serde(skip)]
    pub(crate) name: String,
}

impl FileEntry {
    pub fn from_record(record: &PhotoRecord, name: String) -> Self {
        Self {
            path: record.path.clone(),
            is_nude: record.is_nude,
            has_face: record.has_face,
            status: record.status.clone(),
            nsfw_score: record.nsfw_score,
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_nude(&self) -> bool {
        self.is_nude.unwrap_or(false)
    }

    pub fn has_face(&self) -> bool {
        self.has_face.unwrap_or(false)
    }
}

/// Directory node: direct files plus named child directories.
///
/// `files` and `children` are separate namespaces, so a file and a
/// subdirectory may share a name. Children keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeNode {
    files: Vec<FileEntry>,
    children: Vec<(String, TreeNode)>,
    index: HashMap<String, usize>,
}

impl TreeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.children
            .iter()
            .map(|(name, node)| (name.as_str(), node))
    }

    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.index.get(name).map(|&i| &self.children[i].1)
    }

    pub fn directory_names(&self) -> Vec<&str> {
        self.children.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.children.is_empty()
    }

    /// Find a direct file by leaf name
    pub fn file(&self, name: &str) -> Option<&FileEntry> {
        self.files.iter().find(|entry| entry.name == name)
    }

    pub(crate) fn child_or_insert(&mut self, name: &str) -> &mut TreeNode {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => {
                self.children.push((name.to_string(), TreeNode::new()));
                let i = self.children.len() - 1;
                self.index.insert(name.to_string(), i);
                i
            }
        };
        &mut self.children[i].1
    }

    pub(crate) fn push_file(&mut self, entry: FileEntry) {
        self.files.push(entry);
    }
}

/// Serialized as `{"files": [...], "dirs": {name: node, ...}}`
impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("files", &self.files)?;
        map.serialize_entry("dirs", &Children(&self.children))?;
        map.end()
    }
}

struct Children<'a>(&'a [(String, TreeNode)]);

impl Serialize for Children<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, node) in self.0 {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}
