//! Duplicate detection by name, size, or content digest.
//!
//! Every entry point validates the root up front and fails with
//! [`TamefilesError::NotFound`] when it is missing or not a directory. After
//! that, unreadable files are skipped and the scan always completes. Only
//! groups with two or more paths are returned.

use crate::error::TamefilesError;
use crate::options::ScanOptions;
use crate::types::{DuplicateMap, IdentityKey};
use crate::walk::{Walker, ensure_directory, skipped};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How files are identified as duplicates of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Same final path component.
    Name,
    /// Same size in bytes.
    Size,
    /// Same MD5 digest of the full content.
    #[default]
    Content,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Name => "name",
            Strategy::Size => "size",
            Strategy::Content => "content",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = TamefilesError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Strategy::Name),
            "size" => Ok(Strategy::Size),
            "content" => Ok(Strategy::Content),
            _ => Err(TamefilesError::InvalidArgument(format!(
                "unknown duplicate strategy '{}', expected name, size or content",
                s
            ))),
        }
    }
}

/// Groups files under `root` by the strategy named `strategy`.
///
/// # Errors
///
/// [`TamefilesError::InvalidArgument`] for a strategy other than `name`,
/// `size` or `content`; [`TamefilesError::NotFound`] when `root` is not an
/// existing directory. Both are checked before any traversal.
pub fn find_duplicates(
    root: impl AsRef<Path>,
    strategy: &str,
) -> Result<DuplicateMap, TamefilesError> {
    let strategy: Strategy = strategy.parse()?;
    find_duplicates_with(&ScanOptions::new(root.as_ref()), strategy)
}

pub fn find_duplicates_with(
    options: &ScanOptions,
    strategy: Strategy,
) -> Result<DuplicateMap, TamefilesError> {
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Finding duplicates by {} under {}",
        strategy,
        options.root.display()
    );
    let duplicates = match strategy {
        Strategy::Name => rekey(find_duplicates_by_name_with(options)?, IdentityKey::Name),
        Strategy::Size => rekey(find_duplicates_by_size_with(options)?, IdentityKey::Size),
        Strategy::Content => rekey(
            find_duplicates_by_content_with(options)?,
            IdentityKey::Digest,
        ),
    };
    #[cfg(feature = "logging")]
    tracing::debug!("Found {} duplicate groups", duplicates.len());
    Ok(duplicates)
}

pub fn find_duplicates_by_name(
    root: impl AsRef<Path>,
) -> Result<BTreeMap<String, Vec<PathBuf>>, TamefilesError> {
    find_duplicates_by_name_with(&ScanOptions::new(root.as_ref()))
}

/// Groups by exact base name, regardless of directory or size.
pub fn find_duplicates_by_name_with(
    options: &ScanOptions,
) -> Result<BTreeMap<String, Vec<PathBuf>>, TamefilesError> {
    group_files(options, |path| {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
    })
}

pub fn find_duplicates_by_size(
    root: impl AsRef<Path>,
) -> Result<BTreeMap<u64, Vec<PathBuf>>, TamefilesError> {
    find_duplicates_by_size_with(&ScanOptions::new(root.as_ref()))
}

/// Groups by byte size. Empty files form a group of their own.
pub fn find_duplicates_by_size_with(
    options: &ScanOptions,
) -> Result<BTreeMap<u64, Vec<PathBuf>>, TamefilesError> {
    group_files(options, |path| match fs::metadata(path) {
        Ok(metadata) => Some(metadata.len()),
        Err(e) => {
            skipped(path, &e);
            None
        }
    })
}

pub fn find_duplicates_by_content(
    root: impl AsRef<Path>,
) -> Result<BTreeMap<String, Vec<PathBuf>>, TamefilesError> {
    find_duplicates_by_content_with(&ScanOptions::new(root.as_ref()))
}

/// Groups by MD5 digest, keyed by the lowercase hex string.
pub fn find_duplicates_by_content_with(
    options: &ScanOptions,
) -> Result<BTreeMap<String, Vec<PathBuf>>, TamefilesError> {
    let chunk_size = options.hash_chunk_size;
    group_files(options, |path| match hash_file(path, chunk_size) {
        Ok(digest) => Some(digest),
        Err(e) => {
            skipped(path, &e);
            None
        }
    })
}

/// Streams `path` through MD5 `chunk_size` bytes at a time and returns the
/// 32-character lowercase hex digest.
///
/// A `chunk_size` of 0 reads one byte at a time.
pub fn hash_file(path: &Path, chunk_size: usize) -> Result<String, TamefilesError> {
    let mut file = File::open(path).map_err(|e| TamefilesError::io(path, e))?;
    let mut hasher = Md5::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];
    loop {
        let read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(TamefilesError::io(path, e)),
        };
        hasher.update(&buffer[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

fn group_files<K, F>(
    options: &ScanOptions,
    mut identify: F,
) -> Result<BTreeMap<K, Vec<PathBuf>>, TamefilesError>
where
    K: Ord,
    F: FnMut(&Path) -> Option<K>,
{
    ensure_directory(&options.root)?;
    let mut groups: BTreeMap<K, Vec<PathBuf>> = BTreeMap::new();
    for path in Walker::new(options)?.files() {
        if let Some(key) = identify(&path) {
            groups.entry(key).or_default().push(path);
        }
    }
    groups.retain(|_, paths| paths.len() > 1);
    Ok(groups)
}

fn rekey<K>(groups: BTreeMap<K, Vec<PathBuf>>, key: impl Fn(K) -> IdentityKey) -> DuplicateMap {
    groups
        .into_iter()
        .map(|(k, paths)| (key(k), paths))
        .collect()
}
