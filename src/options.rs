use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of bytes read per step when hashing file content.
pub const DEFAULT_HASH_CHUNK_SIZE: usize = 8192;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub max_depth: Option<usize>,
    pub include_hidden: bool,
    pub respect_gitignore: bool,
    pub follow_links: bool,
    pub ignore_patterns: Vec<String>,
    pub hash_chunk_size: usize,
}
impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            max_depth: None,
            include_hidden: true,
            respect_gitignore: false,
            follow_links: false,
            ignore_patterns: Vec::new(),
            hash_chunk_size: DEFAULT_HASH_CHUNK_SIZE,
        }
    }
}
impl ScanOptions {
    /// Default options rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }
}
#[derive(Debug, Default)]
pub struct ScanBuilder {
    options: ScanOptions,
}
impl ScanBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: ScanOptions::new(root),
        }
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }
    pub fn no_limit_depth(mut self) -> Self {
        self.options.max_depth = None;
        self
    }
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.options.include_hidden = yes;
        self
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.options.respect_gitignore = yes;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn hash_chunk_size(mut self, bytes: usize) -> Self {
        self.options.hash_chunk_size = bytes;
        self
    }
    pub fn build(self) -> ScanOptions {
        self.options
    }
}
