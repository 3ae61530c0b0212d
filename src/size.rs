//! Size queries over every regular file under a root.
//!
//! A root that is missing or not a directory scans as empty; no error is
//! raised here, unlike [`crate::find_duplicates`].

use crate::error::TamefilesError;
use crate::options::ScanOptions;
use crate::types::FileRecord;
use crate::walk::{Walker, skipped};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Number of files [`top_n_largest`] callers usually ask for.
pub const DEFAULT_TOP_N: usize = 10;

/// Orders records largest first, ties broken by ascending path.
#[derive(Debug)]
struct Ranked(FileRecord);

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .size_bytes
            .cmp(&self.0.size_bytes)
            .then_with(|| self.0.path.cmp(&other.0.path))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

fn file_record(path: &Path) -> Option<FileRecord> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            skipped(path, &e);
            return None;
        }
    };
    if !metadata.is_file() {
        return None;
    }
    match fs::canonicalize(path) {
        Ok(canonical) => Some(FileRecord {
            path: canonical,
            size_bytes: metadata.len(),
        }),
        Err(e) => {
            skipped(path, &e);
            None
        }
    }
}

fn scan_records(
    options: &ScanOptions,
) -> Result<impl Iterator<Item = FileRecord> + use<>, TamefilesError> {
    #[cfg(feature = "logging")]
    tracing::debug!("Scanning sizes under {}", options.root.display());
    let walker = if options.root.is_dir() {
        Some(Walker::new(options)?)
    } else {
        #[cfg(feature = "logging")]
        tracing::debug!(
            "{} is not a directory, treating as empty",
            options.root.display()
        );
        None
    };
    // Links to an already seen file resolve to the same canonical path.
    let mut seen: HashSet<PathBuf> = HashSet::new();
    Ok(walker
        .into_iter()
        .flat_map(Walker::files)
        .filter_map(|path| file_record(&path))
        .filter(move |record| seen.insert(record.path.clone())))
}

/// The `n` largest files under `options.root`, largest first.
///
/// Only the `n` best candidates are held in memory at any time.
///
/// # Errors
///
/// Fails only when an ignore pattern is not a valid glob.
pub fn top_n_largest_with(
    options: &ScanOptions,
    n: usize,
) -> Result<Vec<FileRecord>, TamefilesError> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let mut heap = BinaryHeap::with_capacity(n + 1);
    for record in scan_records(options)? {
        heap.push(Ranked(record));
        if heap.len() > n {
            heap.pop();
        }
    }
    let largest: Vec<FileRecord> = heap.into_sorted_vec().into_iter().map(|r| r.0).collect();
    #[cfg(feature = "logging")]
    tracing::debug!("Selected {} largest files", largest.len());
    Ok(largest)
}

/// The `n` largest files under `root`, largest first, ties by path.
pub fn top_n_largest(root: impl AsRef<Path>, n: usize) -> Vec<FileRecord> {
    top_n_largest_with(&ScanOptions::new(root.as_ref()), n).unwrap_or_default()
}

/// The shortest largest-first prefix of files whose sizes sum to at least
/// `target_bytes`.
///
/// Targets of zero or less return nothing without scanning. When every file
/// together falls short of the target, every file is returned.
///
/// # Errors
///
/// Fails only when an ignore pattern is not a valid glob.
pub fn minimal_cover_with(
    options: &ScanOptions,
    target_bytes: i64,
) -> Result<Vec<FileRecord>, TamefilesError> {
    if target_bytes <= 0 {
        return Ok(Vec::new());
    }
    let target = target_bytes.unsigned_abs();
    let mut ranked: Vec<Ranked> = scan_records(options)?.map(Ranked).collect();
    ranked.sort_unstable();

    let mut covered: u64 = 0;
    let mut selected = Vec::new();
    for Ranked(record) in ranked {
        covered = covered.saturating_add(record.size_bytes);
        selected.push(record);
        if covered >= target {
            break;
        }
    }
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Cover of {} bytes uses {} files totalling {} bytes",
        target,
        selected.len(),
        covered
    );
    Ok(selected)
}

/// See [`minimal_cover_with`]; scans with default options.
pub fn minimal_cover(root: impl AsRef<Path>, target_bytes: i64) -> Vec<FileRecord> {
    minimal_cover_with(&ScanOptions::new(root.as_ref()), target_bytes).unwrap_or_default()
}

/// Summed size of every regular file under `options.root`.
pub fn total_size_with(options: &ScanOptions) -> Result<u64, TamefilesError> {
    Ok(scan_records(options)?
        .fold(0u64, |total, record| total.saturating_add(record.size_bytes)))
}

pub fn total_size(root: impl AsRef<Path>) -> u64 {
    total_size_with(&ScanOptions::new(root.as_ref())).unwrap_or_default()
}

/// Lazily yields a [`FileRecord`] for each regular file, in traversal order.
#[cfg(feature = "streaming")]
pub struct FileRecordStream {
    records: Box<dyn Iterator<Item = FileRecord>>,
}

#[cfg(feature = "streaming")]
impl FileRecordStream {
    pub fn new(options: &ScanOptions) -> Result<Self, TamefilesError> {
        Ok(Self {
            records: Box::new(scan_records(options)?),
        })
    }
}

#[cfg(feature = "streaming")]
impl Iterator for FileRecordStream {
    type Item = FileRecord;
    fn next(&mut self) -> Option<Self::Item> {
        self.records.next()
    }
}
