//! Flat hierarchy listing of a directory tree, plus a text rendering of it.
//!
//! The records are the whole contract with treemap renderers: folders carry
//! a value of 0 and consumers roll sizes up themselves (see [`folder_totals`]).

use crate::error::TamefilesError;
use crate::options::ScanOptions;
use crate::types::DirectoryRecord;
use crate::walk::{EntryKind, Walker, ensure_directory, skipped};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One [`DirectoryRecord`] per folder and regular file under `root`, root
/// included, in traversal order.
///
/// # Errors
///
/// Returns [`TamefilesError::NotFound`] if `root` is not an existing directory.
pub fn directory_data(root: impl AsRef<Path>) -> Result<Vec<DirectoryRecord>, TamefilesError> {
    directory_data_with(&ScanOptions::new(root.as_ref()))
}

pub fn directory_data_with(
    options: &ScanOptions,
) -> Result<Vec<DirectoryRecord>, TamefilesError> {
    ensure_directory(&options.root)?;
    #[cfg(feature = "logging")]
    tracing::debug!("Building directory data for {}", options.root.display());

    let mut records = Vec::new();
    // Ids of the directories enclosing the current entry, indexed by depth.
    let mut ancestors: Vec<String> = Vec::new();
    for entry in Walker::new(options)?.entries() {
        let value = match entry.kind {
            EntryKind::Dir => 0,
            EntryKind::File => match fs::metadata(&entry.path) {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    skipped(&entry.path, &e);
                    continue;
                }
            },
        };
        ancestors.truncate(entry.depth);
        let id = entry.path.display().to_string();
        let parent = ancestors.last().cloned().unwrap_or_default();
        let name = entry
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| id.clone());
        if entry.kind == EntryKind::Dir {
            ancestors.push(id.clone());
        }
        records.push(DirectoryRecord {
            id,
            name,
            parent,
            value,
        });
    }
    #[cfg(feature = "logging")]
    tracing::debug!("Collected {} directory records", records.len());
    Ok(records)
}

/// Rolled-up size of every folder: the sum of the values of all records
/// beneath it.
///
/// Records carry no kind, so every zero-valued record gets an entry; for an
/// empty file that entry is simply 0.
pub fn folder_totals(records: &[DirectoryRecord]) -> HashMap<String, u64> {
    let parents: HashMap<&str, &str> = records
        .iter()
        .map(|r| (r.id.as_str(), r.parent.as_str()))
        .collect();
    let mut totals: HashMap<String, u64> = HashMap::new();
    for record in records {
        if record.value == 0 {
            totals.entry(record.id.clone()).or_insert(0);
            continue;
        }
        let mut parent = record.parent.as_str();
        while !parent.is_empty() {
            *totals.entry(parent.to_string()).or_insert(0) += record.value;
            parent = parents.get(parent).copied().unwrap_or("");
        }
    }
    totals
}

/// Renders records as an indented tree similar to the output of `tree`,
/// annotated with human-readable sizes. Folders show their rolled-up size.
pub fn render_tree(records: &[DirectoryRecord]) -> String {
    let totals = folder_totals(records);
    // Index of the final child listed under each parent.
    let last_child: HashMap<&str, usize> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (r.parent.as_str(), i))
        .collect();
    // Indentation handed down to each folder's children.
    let mut indents: HashMap<&str, String> = HashMap::new();
    let mut lines = Vec::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        let size = totals.get(&record.id).copied().unwrap_or(record.value);
        let size = humansize::format_size(size, humansize::DECIMAL);

        if record.parent.is_empty() {
            indents.insert(record.id.as_str(), String::new());
            lines.push(format!(".  # {} ({})", record.id, size));
            continue;
        }
        let indent = indents
            .get(record.parent.as_str())
            .cloned()
            .unwrap_or_default();
        let is_last = last_child.get(record.parent.as_str()) == Some(&i);
        let (branch, continuation) = if is_last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        lines.push(format!("{}{}{} ({})", indent, branch, record.name, size));
        indents.insert(record.id.as_str(), indent + continuation);
    }

    lines.join("\n")
}
