use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A regular file observed during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRecord {
    /// Canonical absolute path, with symlinks resolved.
    pub path: PathBuf,
    /// Size in bytes as reported by the filesystem at scan time.
    pub size_bytes: u64,
}

/// The value files are grouped by when looking for duplicates.
///
/// Serializes as the bare inner value, so a [`DuplicateMap`] renders as a
/// plain JSON object keyed by name, size, or digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum IdentityKey {
    /// Final path component, compared case-sensitively.
    Name(String),
    /// Exact size in bytes.
    Size(u64),
    /// Lowercase hex MD5 digest of the full content.
    Digest(String),
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKey::Name(name) => f.write_str(name),
            IdentityKey::Size(size) => write!(f, "{} bytes", size),
            IdentityKey::Digest(digest) => f.write_str(digest),
        }
    }
}

/// Groups of two or more paths sharing an [`IdentityKey`].
///
/// Paths inside a group keep traversal discovery order.
pub type DuplicateMap = BTreeMap<IdentityKey, Vec<PathBuf>>;

/// One node of a flat hierarchy listing, as consumed by treemap renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    /// The entry's path as traversed.
    pub id: String,
    /// Final path component.
    pub name: String,
    /// The parent's `id`, empty for the root.
    pub parent: String,
    /// Size in bytes for files; always 0 for folders.
    pub value: u64,
}
