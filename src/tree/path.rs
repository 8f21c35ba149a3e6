//! Path normalization and base-relative component splitting.
//!
//! Normalization is lexical and total: any string maps to a key, nothing
//! touches the filesystem and nothing panics.

use std::fmt;
use std::path::is_separator;
use unicode_normalization::UnicodeNormalization;

/// Separator used when joining normalized components
pub const SEPARATOR: char = '/';

/// Lexically normalize a path string.
///
/// Repeated separators collapse, `.` segments disappear and `..` consumes a
/// preceding normal segment. A `..` that climbs above the root of an absolute
/// path is dropped; on a relative path it is kept so the result stays a
/// faithful rewrite of the input. Text is brought to NFC first.
pub fn normalize(path: &str) -> String {
    let path: String = path.nfc().collect();
    let absolute = path.starts_with(is_separator);

    let mut parts: Vec<&str> = Vec::new();
    for part in path.split(is_separator) {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().map_or(false, |last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("{}{}", SEPARATOR, joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// A normalized base path that is stripped from every path before splitting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasePath {
    normalized: Option<String>,
}

impl BasePath {
    pub fn new(base: &str) -> Self {
        if base.is_empty() {
            return Self::default();
        }
        let normalized = normalize(base);
        if normalized == "." {
            return Self::default();
        }
        Self {
            normalized: Some(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        self.normalized.as_deref().unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_none()
    }

    /// Strip the base from an already normalized path.
    ///
    /// The prefix only matches on a component boundary, so a base of
    /// `/photos/a` leaves `/photos/ab/x.jpg` untouched.
    fn strip<'a>(&self, normalized: &'a str) -> &'a str {
        let Some(base) = self.normalized.as_deref() else {
            return normalized;
        };
        if normalized == base {
            return "";
        }
        match normalized.strip_prefix(base) {
            Some(rest) if base.ends_with(SEPARATOR) => rest,
            Some(rest) if rest.starts_with(SEPARATOR) => rest.trim_start_matches(SEPARATOR),
            _ => normalized,
        }
    }

    /// Restore the leading separator that URL routing drops.
    ///
    /// With base `/mnt/photos`, `mnt/photos/A/b.jpg` becomes
    /// `/mnt/photos/A/b.jpg`. Anything not strictly below the base is returned
    /// as is, so base-relative paths like `A/b.jpg` keep working and a
    /// directory named like the base's first segment is never read as the
    /// base itself.
    pub fn reroot(&self, path: &str) -> String {
        match self.normalized.as_deref() {
            Some(base) if base.starts_with(SEPARATOR) && !path.starts_with(is_separator) => {
                let candidate = format!("{}{}", SEPARATOR, path);
                let normalized = normalize(&candidate);
                let relative = self.strip(&normalized);
                if !relative.is_empty() && relative.len() < normalized.len() {
                    candidate
                } else {
                    path.to_string()
                }
            }
            _ => path.to_string(),
        }
    }

    /// Split `path` into components relative to this base
    pub fn split(&self, path: &str) -> PathKey {
        let normalized = normalize(path);
        let relative = self.strip(&normalized);
        let components = relative
            .split(SEPARATOR)
            .filter(|part| !part.is_empty() && *part != "." && *part != "..")
            .map(str::to_string)
            .collect();
        PathKey { components }
    }
}

/// Ordered components of a normalized, base-relative path.
///
/// All but the last component name directories; the last names the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathKey {
    components: Vec<String>,
}

impl PathKey {
    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Directory components (everything but the leaf)
    pub fn parent(&self) -> &[String] {
        match self.components.split_last() {
            Some((_, parent)) => parent,
            None => &[],
        }
    }

    pub fn leaf(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }

    pub fn into_components(self) -> Vec<String> {
        self.components
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.components.join("/"))
    }
}

/// Split `path` into components relative to `base`
pub fn split(path: &str, base: &str) -> Vec<String> {
    BasePath::new(base).split(path).into_components()
}
