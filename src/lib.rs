//! # Tamefiles
//!
//! `tamefiles` answers read-only questions about a directory tree: which files are the
//! largest, which files would have to go to free a given amount of space, and which files
//! are duplicates of each other by name, size, or content. It can also produce a flat
//! hierarchy listing suitable for a size-proportional treemap.
//!
//! Nothing is ever deleted, moved, or modified. Every call walks the filesystem afresh.
//!
//! Entries that cannot be read (permission denied, broken symlinks, files removed mid-scan)
//! are skipped. The size queries treat a missing root as empty, while duplicate detection
//! and directory data reject it with [`TamefilesError::NotFound`].
//!
//! # Features
//!
//! - `streaming`: Enables [`FileRecordStream`], a lazy iterator over every file.
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use tamefiles::{ScanBuilder, Strategy, find_duplicates_with, minimal_cover, top_n_largest};
//!
//! for file in top_n_largest("/var/log", 5) {
//!     println!("{} {}", file.size_bytes, file.path.display());
//! }
//!
//! let to_free = minimal_cover("/var/log", 1_000_000_000);
//! println!("{} files would free 1 GB", to_free.len());
//!
//! let options = ScanBuilder::new("/home/me/photos")
//!     .ignore_patterns(vec!["*.tmp".into()])
//!     .build();
//! let groups = find_duplicates_with(&options, Strategy::Content).expect("Failed to scan directory");
//! for (digest, paths) in groups {
//!     println!("{}: {:?}", digest, paths);
//! }
//! ```

mod duplicates;
mod error;
mod options;
pub mod output;
mod size;
mod tree;
mod types;
mod walk;

pub use duplicates::{
    Strategy, find_duplicates, find_duplicates_by_content, find_duplicates_by_content_with,
    find_duplicates_by_name, find_duplicates_by_name_with, find_duplicates_by_size,
    find_duplicates_by_size_with, find_duplicates_with, hash_file,
};
pub use error::TamefilesError;
pub use options::{DEFAULT_HASH_CHUNK_SIZE, ScanBuilder, ScanOptions};
#[cfg(feature = "streaming")]
pub use size::FileRecordStream;
pub use size::{
    DEFAULT_TOP_N, minimal_cover, minimal_cover_with, top_n_largest, top_n_largest_with,
    total_size, total_size_with,
};
pub use tree::{directory_data, directory_data_with, folder_totals, render_tree};
pub use types::{DirectoryRecord, DuplicateMap, FileRecord, IdentityKey};
