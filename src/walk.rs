//! Directory traversal shared by every analysis.
//!
//! Each public operation builds its own [`Walker`] and walks the tree exactly
//! once. Entries that fail to read are skipped, never surfaced.

use crate::error::TamefilesError;
use crate::options::ScanOptions;
use ignore::WalkBuilder;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    File,
    Dir,
}

#[derive(Debug)]
pub(crate) struct WalkEntry {
    pub(crate) path: PathBuf,
    pub(crate) kind: EntryKind,
    pub(crate) depth: usize,
}

pub(crate) struct Walker {
    inner: ignore::Walk,
}

impl Walker {
    pub(crate) fn new(options: &ScanOptions) -> Result<Self, TamefilesError> {
        let mut builder = WalkBuilder::new(&options.root);
        builder
            .standard_filters(false)
            .hidden(!options.include_hidden)
            .git_ignore(options.respect_gitignore)
            .git_exclude(options.respect_gitignore)
            .require_git(false)
            .max_depth(options.max_depth)
            .follow_links(options.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b));
        if !options.ignore_patterns.is_empty() {
            let mut glob_builder = globset::GlobSetBuilder::new();
            for pattern in &options.ignore_patterns {
                let glob = globset::Glob::new(pattern).map_err(|e| {
                    TamefilesError::InvalidArgument(format!(
                        "invalid glob pattern '{}': {}",
                        pattern, e
                    ))
                })?;
                glob_builder.add(glob);
            }
            let matcher = glob_builder.build().map_err(|e| {
                TamefilesError::InvalidArgument(format!("failed to build glob set: {}", e))
            })?;
            builder.filter_entry(move |entry| !matcher.is_match(entry.path()));
        }
        Ok(Self {
            inner: builder.build(),
        })
    }

    /// Every directory and regular file, depth first, siblings sorted by name.
    pub(crate) fn entries(self) -> impl Iterator<Item = WalkEntry> {
        self.inner.filter_map(|result| match result {
            Ok(entry) => {
                let kind = classify(&entry)?;
                Some(WalkEntry {
                    depth: entry.depth(),
                    path: entry.into_path(),
                    kind,
                })
            }
            #[cfg_attr(not(feature = "logging"), allow(unused_variables))]
            Err(e) => {
                #[cfg(feature = "logging")]
                tracing::debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
    }

    pub(crate) fn files(self) -> impl Iterator<Item = PathBuf> {
        self.entries()
            .filter(|entry| entry.kind == EntryKind::File)
            .map(|entry| entry.path)
    }
}

fn classify(entry: &ignore::DirEntry) -> Option<EntryKind> {
    let file_type = entry.file_type()?;
    if file_type.is_dir() {
        return Some(EntryKind::Dir);
    }
    if file_type.is_file() {
        return Some(EntryKind::File);
    }
    if file_type.is_symlink() {
        // Unfollowed link: counts only when it resolves to a regular file.
        return match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_file() => Some(EntryKind::File),
            Ok(_) => None,
            Err(e) => {
                skipped(entry.path(), &e);
                None
            }
        };
    }
    None
}

/// Fails with [`TamefilesError::NotFound`] unless `root` is an existing directory.
pub(crate) fn ensure_directory(root: &Path) -> Result<(), TamefilesError> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(TamefilesError::NotFound(root.to_path_buf()))
    }
}

#[cfg_attr(not(feature = "logging"), allow(unused_variables))]
pub(crate) fn skipped(path: &Path, reason: &dyn Display) {
    #[cfg(feature = "logging")]
    tracing::debug!("Skipping entry {}: {}", path.display(), reason);
}
