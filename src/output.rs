//! Output formatting for analysis results.
//!
//! Renders file records, duplicate groups, and directory data as plain text,
//! Markdown, or JSON.

use crate::tree::render_tree;
use crate::{DirectoryRecord, DuplicateMap, FileRecord, TamefilesError};
use humansize::{DECIMAL, format_size};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Text,
    Json,
}

impl OutputFormat {
    /// Returns the conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// Formats a ranked list of files, such as a top-N or cover result.
pub fn format_files(
    files: &[FileRecord],
    format: OutputFormat,
    pretty: bool,
) -> Result<String, TamefilesError> {
    match format {
        OutputFormat::Json => format_json(files, pretty),
        OutputFormat::Text => {
            let total: u64 = files.iter().map(|f| f.size_bytes).sum();
            let mut out = String::with_capacity(64 * (files.len() + 1));
            for file in files {
                out.push_str(&format!(
                    "{:>12}  {}\n",
                    format_size(file.size_bytes, DECIMAL),
                    file.path.display()
                ));
            }
            out.push_str(&format!(
                "{} files, {} total\n",
                files.len(),
                format_size(total, DECIMAL)
            ));
            Ok(out)
        }
        OutputFormat::Markdown => {
            let mut out = String::from("| Size (bytes) | Path |\n|---:|---|\n");
            for file in files {
                out.push_str(&format!(
                    "| {} | `{}` |\n",
                    file.size_bytes,
                    file.path.display()
                ));
            }
            Ok(out)
        }
    }
}

/// Formats duplicate groups, one heading or block per identity key.
pub fn format_duplicates(
    groups: &DuplicateMap,
    format: OutputFormat,
    pretty: bool,
) -> Result<String, TamefilesError> {
    match format {
        OutputFormat::Json => format_json(groups, pretty),
        OutputFormat::Text => {
            let mut out = String::new();
            for (key, paths) in groups {
                out.push_str(&format!("{} ({} files)\n", key, paths.len()));
                for path in paths {
                    out.push_str(&format!("    {}\n", path.display()));
                }
            }
            if groups.is_empty() {
                out.push_str("No duplicates found\n");
            }
            Ok(out)
        }
        OutputFormat::Markdown => {
            let mut out = String::new();
            for (key, paths) in groups {
                out.push_str(&format!("## {}\n\n", key));
                for path in paths {
                    out.push_str(&format!("- `{}`\n", path.display()));
                }
                out.push('\n');
            }
            Ok(out)
        }
    }
}

/// Formats the flat hierarchy listing. Text renders it as a tree.
pub fn format_directory_data(
    records: &[DirectoryRecord],
    format: OutputFormat,
    pretty: bool,
) -> Result<String, TamefilesError> {
    match format {
        OutputFormat::Json => format_json(records, pretty),
        OutputFormat::Text => {
            let mut out = render_tree(records);
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Markdown => {
            let mut out = String::from("| id | name | parent | value |\n|---|---|---|---:|\n");
            for record in records {
                out.push_str(&format!(
                    "| `{}` | {} | `{}` | {} |\n",
                    record.id, record.name, record.parent, record.value
                ));
            }
            Ok(out)
        }
    }
}

/// Writes already formatted output to a file.
pub fn write_to_file(formatted: &str, path: impl AsRef<Path>) -> Result<(), TamefilesError> {
    fs::write(&path, formatted).map_err(|e| TamefilesError::io(path.as_ref(), e))
}

// ----------------------- Internal formatting -----------------------

fn format_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, TamefilesError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
