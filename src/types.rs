//! Core types shared by the store, the tree engine and the HTTP surface.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Hash: Generic 256-bit hash value
pub type Hash = [u8; 32];

/// Moderation status of a photo
///
/// The domain is open: values outside the four known states are kept verbatim
/// in `Other` instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Review,
    Approved,
    Rejected,
    Published,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Review => "review",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
            Status::Published => "published",
            Status::Other(value) => value,
        }
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        match value.as_str() {
            "review" => Status::Review,
            "approved" => Status::Approved,
            "rejected" => Status::Rejected,
            "published" => Status::Published,
            _ => Status::Other(value),
        }
    }
}

impl From<&str> for Status {
    fn from(value: &str) -> Self {
        Status::from(value.to_string())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key used for the missing-status bucket when counts are serialized
pub const UNSET_STATUS_KEY: &str = "null";

/// File counts grouped by status, with a dedicated bucket for records
/// that carry no status at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts {
    counts: BTreeMap<Option<Status>, u64>,
}

impl StatusCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, status: Option<&Status>) {
        *self.counts.entry(status.cloned()).or_insert(0) += 1;
    }

    /// Bucket-wise sum of `other` into `self`
    pub fn merge(&mut self, other: &StatusCounts) {
        for (status, count) in &other.counts {
            *self.counts.entry(status.clone()).or_insert(0) += count;
        }
    }

    pub fn get(&self, status: Option<&Status>) -> u64 {
        self.counts.get(&status.cloned()).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<&Status>, u64)> {
        self.counts.iter().map(|(status, count)| (status.as_ref(), *count))
    }
}

impl Serialize for StatusCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (status, count) in &self.counts {
            let key = status.as_ref().map(Status::as_str).unwrap_or(UNSET_STATUS_KEY);
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}
