//! Tree store.
//!
//! Owns the root directory and exposes the two lookups every VFS operation
//! is built on: the node at a path and the directory that would hold it.
//! Mutable access is crate-private so that structural changes always go
//! through [`crate::Vfs`], which persists after each one.

use crate::node::{DirectoryNode, NodeRef};
use crate::path::split_last;

/// The node graph, rooted at a nameless directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    root: DirectoryNode,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree holding only the root directory.
    pub fn new() -> Self {
        Self::from_root(DirectoryNode::new(""))
    }

    /// Wrap an existing directory as the root. Its name is cleared.
    pub fn from_root(mut root: DirectoryNode) -> Self {
        root.name.clear();
        Self { root }
    }

    /// The root directory.
    pub fn root(&self) -> &DirectoryNode {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut DirectoryNode {
        &mut self.root
    }

    /// Walk from the root following `segments`.
    ///
    /// Fails as soon as a segment is missing or an intermediate node is a
    /// file. Empty `segments` yields the root.
    pub fn get_node(&self, segments: &[String]) -> Option<NodeRef<'_>> {
        match split_last(segments) {
            Some((parent, name)) => self.get_directory(parent)?.child(name).map(NodeRef::from),
            None => Some(NodeRef::Directory(&self.root)),
        }
    }

    /// The directory at `segments`, if that path names one.
    pub fn get_directory(&self, segments: &[String]) -> Option<&DirectoryNode> {
        segments
            .iter()
            .try_fold(&self.root, |dir, name| dir.child(name)?.as_directory())
    }

    pub(crate) fn get_directory_mut(&mut self, segments: &[String]) -> Option<&mut DirectoryNode> {
        let mut dir = &mut self.root;
        for name in segments {
            dir = dir.child_mut(name)?.as_directory_mut()?;
        }
        Some(dir)
    }

    /// The directory that holds (or would hold) the last segment.
    ///
    /// The root has no parent, so empty `segments` yields `None`.
    pub fn get_parent(&self, segments: &[String]) -> Option<&DirectoryNode> {
        let (parent, _) = split_last(segments)?;
        self.get_directory(parent)
    }

    pub(crate) fn get_parent_mut(&mut self, segments: &[String]) -> Option<&mut DirectoryNode> {
        let (parent, _) = split_last(segments)?;
        self.get_directory_mut(parent)
    }
}
