//! The VFS operations surface.
//!
//! Every operation takes the caller's working directory explicitly; the VFS
//! holds no notion of a current location. Mutations persist the whole tree
//! on success and leave both tree and store untouched on failure.

use tracing::{debug, error, info, warn};

use crate::codec::{decode_tree, encode_tree};
use crate::config::{SnapshotLimits, VfsConfig, MAX_PATH_DEPTH};
use crate::error::{VfsError, VfsResult};
use crate::node::{DirEntry, DirectoryNode, FsNode, NodeRef};
use crate::path::{is_within, resolve, split_last, to_absolute};
use crate::snapshot::{self, SnapshotEntry};
use crate::storage::{KeyValueStore, StorageUsage};
use crate::tree::Tree;

/// In-memory filesystem persisted through a [`KeyValueStore`].
pub struct Vfs<S: KeyValueStore> {
    tree: Tree,
    store: S,
    config: VfsConfig,
}

impl<S: KeyValueStore> Vfs<S> {
    /// Hydrate from `store` using the default configuration.
    pub fn new(store: S) -> Self {
        Self::load(store, VfsConfig::default())
    }

    /// Hydrate from `store`.
    ///
    /// A missing entry seeds a fresh tree. An unreadable or corrupt entry is
    /// logged and also replaced by a fresh tree.
    pub fn load(store: S, config: VfsConfig) -> Self {
        let tree = match store.load(&config.storage_key) {
            Ok(Some(text)) => match decode_tree(&text) {
                Ok(tree) => {
                    info!(key = %config.storage_key, "restored persisted tree");
                    tree
                }
                Err(e) => {
                    warn!(key = %config.storage_key, "discarding corrupt tree: {}", e);
                    seeded_tree(&config)
                }
            },
            Ok(None) => {
                info!(key = %config.storage_key, "no persisted tree, seeding a fresh one");
                seeded_tree(&config)
            }
            Err(e) => {
                warn!(key = %config.storage_key, "storage unavailable, seeding a fresh tree: {}", e);
                seeded_tree(&config)
            }
        };

        Self {
            tree,
            store,
            config,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &VfsConfig {
        &self.config
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        let result = encode_tree(&self.tree)
            .and_then(|text| self.store.store(&self.config.storage_key, &text));
        if let Err(e) = result {
            error!(key = %self.config.storage_key, "failed to persist tree: {}", e);
        }
    }

    /// Discard the tree and start over from the seed directories.
    pub fn reset(&mut self) {
        self.tree = seeded_tree(&self.config);
        info!("filesystem reset");
        self.persist();
    }

    // ========== Queries ==========

    /// Immediate children of a directory, or the entry itself for a file.
    ///
    /// A missing path yields an empty list.
    pub fn list(&self, path: &str, cwd: &str) -> Vec<DirEntry> {
        match self.tree.get_node(&resolve(path, cwd)) {
            Some(NodeRef::Directory(dir)) => dir.children().iter().map(DirEntry::from).collect(),
            Some(node) => vec![DirEntry::from(node)],
            None => Vec::new(),
        }
    }

    /// File content, or `None` for a missing path or a directory.
    pub fn read(&self, path: &str, cwd: &str) -> Option<&str> {
        self.tree
            .get_node(&resolve(path, cwd))
            .and_then(NodeRef::as_file)
            .map(|f| f.content.as_str())
    }

    /// Canonical absolute form of `path`; never touches the tree.
    pub fn get_absolute_path(&self, path: &str, cwd: &str) -> String {
        to_absolute(&resolve(path, cwd))
    }

    pub fn exists(&self, path: &str, cwd: &str) -> bool {
        self.tree.get_node(&resolve(path, cwd)).is_some()
    }

    pub fn is_directory(&self, path: &str, cwd: &str) -> bool {
        self.tree
            .get_node(&resolve(path, cwd))
            .is_some_and(NodeRef::is_directory)
    }

    pub fn is_file(&self, path: &str, cwd: &str) -> bool {
        self.tree
            .get_node(&resolve(path, cwd))
            .is_some_and(NodeRef::is_file)
    }

    /// File/directory counts and content bytes of a subtree.
    pub fn usage(&self, path: &str, cwd: &str) -> Option<StorageUsage> {
        let node = self.tree.get_node(&resolve(path, cwd))?;
        let mut usage = StorageUsage::new();
        let mut pending = vec![node];
        while let Some(node) = pending.pop() {
            match node {
                NodeRef::File(f) => usage.add_file(f.content.len() as u64),
                NodeRef::Directory(d) => {
                    usage.add_directory();
                    pending.extend(d.children().iter().map(NodeRef::from));
                }
            }
        }
        Some(usage)
    }

    /// Capped listing of the subtree at `root_path` (resolved from `/`).
    pub fn snapshot(&self, root_path: &str, max_items: usize, max_preview: usize) -> Vec<SnapshotEntry> {
        self.snapshot_with(root_path, &SnapshotLimits::new(max_items, max_preview))
    }

    /// Like [`Vfs::snapshot`] with explicit limits.
    pub fn snapshot_with(&self, root_path: &str, limits: &SnapshotLimits) -> Vec<SnapshotEntry> {
        snapshot::collect(&self.tree, &resolve(root_path, "/"), limits)
    }

    // ========== Mutations ==========

    /// Create or overwrite a file. The parent must already be a directory.
    pub fn write(&mut self, path: &str, content: &str, cwd: &str) -> VfsResult<()> {
        let segments = resolve(path, cwd);
        let (_, name) = split_last(&segments).ok_or(VfsError::NotAFile)?;
        let name = String::from(name);
        check_depth(segments.len())?;
        self.require_parent(&segments)?;

        let parent = self
            .tree
            .get_parent_mut(&segments)
            .ok_or(VfsError::NotFound)?;
        match parent.child_mut(&name) {
            Some(FsNode::File(file)) => file.content = String::from(content),
            Some(FsNode::Directory(_)) => return Err(VfsError::NotAFile),
            None => parent.insert(FsNode::file(name, content)),
        }

        debug!(path = %to_absolute(&segments), bytes = content.len(), "write");
        self.persist();
        Ok(())
    }

    /// Create an empty file unless something already exists at `path`.
    pub fn touch(&mut self, path: &str, cwd: &str) -> VfsResult<()> {
        if self.exists(path, cwd) {
            return Ok(());
        }
        self.write(path, "", cwd)
    }

    /// Create every missing directory along `path`.
    ///
    /// Succeeds without changes if the whole path already exists as
    /// directories; fails if any existing segment is a file.
    pub fn mkdir(&mut self, path: &str, cwd: &str) -> VfsResult<()> {
        let segments = resolve(path, cwd);
        let created = make_dirs(&mut self.tree, &segments)?;
        debug!(path = %to_absolute(&segments), created, "mkdir");
        self.persist();
        Ok(())
    }

    /// Remove a file or an empty directory.
    pub fn rm(&mut self, path: &str, cwd: &str) -> VfsResult<()> {
        self.remove(path, cwd, false)
    }

    /// Remove an empty directory; files are rejected.
    pub fn rmdir(&mut self, path: &str, cwd: &str) -> VfsResult<()> {
        self.remove(path, cwd, true)
    }

    fn remove(&mut self, path: &str, cwd: &str, directory_only: bool) -> VfsResult<()> {
        let segments = resolve(path, cwd);
        let (_, name) = split_last(&segments).ok_or(VfsError::PermissionDenied)?;
        let name = String::from(name);

        match self.tree.get_node(&segments) {
            None => return Err(VfsError::NotFound),
            Some(NodeRef::File(_)) if directory_only => return Err(VfsError::NotADirectory),
            Some(NodeRef::Directory(dir)) if !dir.is_empty() => {
                return Err(VfsError::DirectoryNotEmpty)
            }
            Some(_) => {}
        }

        self.tree
            .get_parent_mut(&segments)
            .and_then(|parent| parent.remove(&name))
            .ok_or(VfsError::NotFound)?;

        debug!(path = %to_absolute(&segments), "rm");
        self.persist();
        Ok(())
    }

    /// Detach the node at `src` and re-attach it at `dst` under the final
    /// segment of `dst`.
    pub fn mv(&mut self, src: &str, dst: &str, cwd: &str) -> VfsResult<()> {
        let (from, to) = self.check_transfer(src, dst, cwd)?;
        if from.is_empty() {
            return Err(VfsError::PermissionDenied);
        }
        if self.tree.get_node(&from).is_some_and(NodeRef::is_directory) && is_within(&to, &from) {
            return Err(VfsError::invalid_path("cannot move a directory into itself"));
        }
        let (_, from_name) = split_last(&from).ok_or(VfsError::PermissionDenied)?;
        let (_, to_name) = split_last(&to).ok_or(VfsError::AlreadyExists)?;
        let (from_name, to_name) = (String::from(from_name), String::from(to_name));

        let mut node = self
            .tree
            .get_parent_mut(&from)
            .and_then(|parent| parent.remove(&from_name))
            .ok_or(VfsError::NotFound)?;
        node.set_name(to_name);
        self.attach(&to, node)?;

        debug!(from = %to_absolute(&from), to = %to_absolute(&to), "mv");
        self.persist();
        Ok(())
    }

    /// Deep-copy the subtree at `src` to `dst`.
    pub fn cp(&mut self, src: &str, dst: &str, cwd: &str) -> VfsResult<()> {
        let (from, to) = self.check_transfer(src, dst, cwd)?;
        let (_, to_name) = split_last(&to).ok_or(VfsError::AlreadyExists)?;

        let mut node = self
            .tree
            .get_node(&from)
            .map(NodeRef::to_node)
            .ok_or(VfsError::NotFound)?;
        node.set_name(to_name);
        self.attach(&to, node)?;

        debug!(from = %to_absolute(&from), to = %to_absolute(&to), "cp");
        self.persist();
        Ok(())
    }

    // ========== Helpers ==========

    /// Shared precondition checks for `mv` and `cp`.
    fn check_transfer(&self, src: &str, dst: &str, cwd: &str) -> VfsResult<(Vec<String>, Vec<String>)> {
        let from = resolve(src, cwd);
        let to = resolve(dst, cwd);

        if self.tree.get_node(&from).is_none() {
            return Err(VfsError::NotFound);
        }
        if to.is_empty() || self.tree.get_node(&to).is_some() {
            return Err(VfsError::AlreadyExists);
        }
        self.require_parent(&to)?;
        let height = self.tree.get_node(&from).map_or(0, NodeRef::height);
        check_depth(to.len() + height)?;
        Ok((from, to))
    }

    /// Ensure the parent of `segments` is an existing directory.
    fn require_parent(&self, segments: &[String]) -> VfsResult<()> {
        let (parent, _) = split_last(segments).ok_or(VfsError::PermissionDenied)?;
        match self.tree.get_node(parent) {
            Some(NodeRef::Directory(_)) => Ok(()),
            Some(NodeRef::File(_)) => Err(VfsError::NotADirectory),
            None => Err(VfsError::NotFound),
        }
    }

    fn attach(&mut self, to: &[String], node: FsNode) -> VfsResult<()> {
        let parent = self.tree.get_parent_mut(to).ok_or(VfsError::NotFound)?;
        parent.insert(node);
        Ok(())
    }
}

/// Create the missing directories along `segments`, returning how many were
/// created.
fn make_dirs(tree: &mut Tree, segments: &[String]) -> VfsResult<usize> {
    check_depth(segments.len())?;
    let mut created = 0;
    let mut dir: &mut DirectoryNode = tree.root_mut();
    for name in segments {
        if !dir.contains(name) {
            dir.insert(FsNode::directory(name.clone()));
            created += 1;
        }
        dir = dir
            .child_mut(name)
            .and_then(FsNode::as_directory_mut)
            .ok_or(VfsError::NotADirectory)?;
    }
    Ok(created)
}

/// Reject paths nested deeper than [`MAX_PATH_DEPTH`].
fn check_depth(depth: usize) -> VfsResult<()> {
    if depth > MAX_PATH_DEPTH {
        return Err(VfsError::invalid_path(format!(
            "nested deeper than {} levels",
            MAX_PATH_DEPTH
        )));
    }
    Ok(())
}

fn seeded_tree(config: &VfsConfig) -> Tree {
    let mut tree = Tree::new();
    for dir in &config.seed_directories {
        if let Err(e) = make_dirs(&mut tree, &resolve(dir, "/")) {
            warn!(path = %dir, "cannot seed directory: {}", e);
        }
    }
    tree
}

#[cfg(test)]
#[path = "vfs_tests.rs"]
mod vfs_tests;
