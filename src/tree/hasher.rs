//! Structural fingerprint of a built tree

use crate::tree::node::{FileEntry, TreeNode};
use crate::types::Hash;

const FILE_TAG: u8 = 0x01;
const DIR_TAG: u8 = 0x02;

/// Deterministic digest of a subtree.
///
/// Covers file order and every file attribute, child order, child names and,
/// recursively, child digests. Two trees built from the same record sequence
/// always share a fingerprint.
pub fn fingerprint(node: &TreeNode) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(node.files().len() as u64).to_le_bytes());
    for entry in node.files() {
        hash_file(&mut hasher, entry);
    }
    hasher.update(&(node.child_count() as u64).to_le_bytes());
    for (name, child) in node.children() {
        hasher.update(&[DIR_TAG]);
        hash_str(&mut hasher, name);
        hasher.update(&fingerprint(child));
    }
    *hasher.finalize().as_bytes()
}

/// Hex form of [`fingerprint`], used as an HTTP entity tag
pub fn fingerprint_hex(node: &TreeNode) -> String {
    hex::encode(fingerprint(node))
}

fn hash_file(hasher: &mut blake3::Hasher, entry: &FileEntry) {
    hasher.update(&[FILE_TAG]);
    hash_str(hasher, &entry.path);
    hash_flag(hasher, entry.is_nude);
    hash_flag(hasher, entry.has_face);
    match &entry.status {
        Some(status) => {
            hasher.update(&[1]);
            hash_str(hasher, status.as_str());
        }
        None => {
            hasher.update(&[0]);
        }
    }
    match entry.nsfw_score {
        Some(score) => {
            hasher.update(&[1]);
            hasher.update(&score.to_bits().to_le_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
}

fn hash_flag(hasher: &mut blake3::Hasher, flag: Option<bool>) {
    let byte = match flag {
        None => 0u8,
        Some(false) => 1,
        Some(true) => 2,
    };
    hasher.update(&[byte]);
}

fn hash_str(hasher: &mut blake3::Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
