//! VFS configuration.

use serde::{Deserialize, Serialize};

use crate::error::{VfsError, VfsResult};

/// Default key under which the serialized tree is stored.
pub const DEFAULT_STORAGE_KEY: &str = "sandbox.vfs.tree";

/// Directory every fresh tree starts with.
pub const DEFAULT_SEED_DIRECTORY: &str = "/sandbox";

/// Deepest path the tree may hold, counted in segments below the root.
///
/// Encoding, decoding and cloning a subtree recurse once per level, so
/// mutations that would nest deeper are rejected.
pub const MAX_PATH_DEPTH: usize = 128;

/// Hard cap on snapshot recursion depth.
pub const MAX_SNAPSHOT_DEPTH: usize = 10;

/// Default cap on snapshot entries.
pub const DEFAULT_SNAPSHOT_ITEMS: usize = 200;

/// Default number of characters previewed per file.
pub const DEFAULT_PREVIEW_CHARS: usize = 120;

/// Bounds applied to [`crate::Vfs::snapshot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotLimits {
    /// Maximum number of entries returned
    pub max_items: usize,
    /// Maximum characters of file content included as a preview
    pub max_preview: usize,
    /// Maximum directory depth below the snapshot root
    pub max_depth: usize,
}

impl Default for SnapshotLimits {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_SNAPSHOT_ITEMS,
            max_preview: DEFAULT_PREVIEW_CHARS,
            max_depth: MAX_SNAPSHOT_DEPTH,
        }
    }
}

impl SnapshotLimits {
    pub fn new(max_items: usize, max_preview: usize) -> Self {
        Self {
            max_items,
            max_preview,
            ..Self::default()
        }
    }

    /// Depth actually used, never above [`MAX_SNAPSHOT_DEPTH`].
    pub fn effective_depth(&self) -> usize {
        self.max_depth.min(MAX_SNAPSHOT_DEPTH)
    }
}

/// VFS settings supplied by the hosting application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VfsConfig {
    /// Store key holding the serialized tree
    pub storage_key: String,
    /// Directories created when no persisted tree exists
    pub seed_directories: Vec<String>,
    /// Snapshot bounds used when the caller does not pass its own
    pub snapshot: SnapshotLimits,
}

impl Default for VfsConfig {
    fn default() -> Self {
        Self {
            storage_key: String::from(DEFAULT_STORAGE_KEY),
            seed_directories: vec![String::from(DEFAULT_SEED_DIRECTORY)],
            snapshot: SnapshotLimits::default(),
        }
    }
}

impl VfsConfig {
    /// Parse a (possibly partial) JSON config; absent fields take defaults.
    pub fn from_json(text: &str) -> VfsResult<Self> {
        serde_json::from_str(text).map_err(|e| VfsError::storage(format!("invalid config: {}", e)))
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}
