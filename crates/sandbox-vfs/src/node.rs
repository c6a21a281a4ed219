//! Tree node types.
//!
//! A directory owns its children outright; there are no parent pointers or
//! shared nodes, so the structure is always a tree.

use serde::{Deserialize, Serialize};

/// Kind of a filesystem node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Directory => "directory",
        }
    }
}

/// A file: a name and opaque text content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    pub content: String,
}

impl FileNode {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A directory with uniquely named children, kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryNode {
    pub name: String,
    children: Vec<FsNode>,
}

impl DirectoryNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[FsNode] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|c| c.name() == name)
    }

    pub fn child(&self, name: &str) -> Option<&FsNode> {
        self.children.iter().find(|c| c.name() == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut FsNode> {
        self.children.iter_mut().find(|c| c.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Insert a child, replacing any existing child with the same name in
    /// place so listing order stays stable.
    pub fn insert(&mut self, node: FsNode) {
        match self.position(node.name()) {
            Some(index) => self.children[index] = node,
            None => self.children.push(node),
        }
    }

    /// Detach and return the named child.
    pub fn remove(&mut self, name: &str) -> Option<FsNode> {
        self.position(name).map(|index| self.children.remove(index))
    }
}

/// A node in the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FsNode {
    File(FileNode),
    Directory(DirectoryNode),
}

impl FsNode {
    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        FsNode::File(FileNode::new(name, content))
    }

    pub fn directory(name: impl Into<String>) -> Self {
        FsNode::Directory(DirectoryNode::new(name))
    }

    pub fn name(&self) -> &str {
        match self {
            FsNode::File(f) => &f.name,
            FsNode::Directory(d) => &d.name,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        match self {
            FsNode::File(f) => f.name = name.into(),
            FsNode::Directory(d) => d.name = name.into(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            FsNode::File(_) => NodeKind::File,
            FsNode::Directory(_) => NodeKind::Directory,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, FsNode::File(_))
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, FsNode::Directory(_))
    }

    pub fn as_directory(&self) -> Option<&DirectoryNode> {
        match self {
            FsNode::Directory(d) => Some(d),
            FsNode::File(_) => None,
        }
    }

    pub fn as_directory_mut(&mut self) -> Option<&mut DirectoryNode> {
        match self {
            FsNode::Directory(d) => Some(d),
            FsNode::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            FsNode::File(f) => Some(f),
            FsNode::Directory(_) => None,
        }
    }

    /// Content length in bytes for files, child count for directories.
    pub fn size(&self) -> usize {
        match self {
            FsNode::File(f) => f.content.len(),
            FsNode::Directory(d) => d.len(),
        }
    }
}

/// Borrowed view of a node.
///
/// The root directory is not wrapped in an [`FsNode`], so tree lookups hand
/// out this view instead of `&FsNode`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRef<'a> {
    File(&'a FileNode),
    Directory(&'a DirectoryNode),
}

impl<'a> NodeRef<'a> {
    pub fn name(self) -> &'a str {
        match self {
            NodeRef::File(f) => &f.name,
            NodeRef::Directory(d) => &d.name,
        }
    }

    pub fn kind(self) -> NodeKind {
        match self {
            NodeRef::File(_) => NodeKind::File,
            NodeRef::Directory(_) => NodeKind::Directory,
        }
    }

    pub fn is_file(self) -> bool {
        matches!(self, NodeRef::File(_))
    }

    pub fn is_directory(self) -> bool {
        matches!(self, NodeRef::Directory(_))
    }

    pub fn as_file(self) -> Option<&'a FileNode> {
        match self {
            NodeRef::File(f) => Some(f),
            NodeRef::Directory(_) => None,
        }
    }

    pub fn as_directory(self) -> Option<&'a DirectoryNode> {
        match self {
            NodeRef::Directory(d) => Some(d),
            NodeRef::File(_) => None,
        }
    }

    /// Content length in bytes for files, child count for directories.
    pub fn size(self) -> usize {
        match self {
            NodeRef::File(f) => f.content.len(),
            NodeRef::Directory(d) => d.len(),
        }
    }

    /// Deep copy of the viewed subtree.
    pub fn to_node(self) -> FsNode {
        match self {
            NodeRef::File(f) => FsNode::File(f.clone()),
            NodeRef::Directory(d) => FsNode::Directory(d.clone()),
        }
    }

    /// Number of levels below this node: 0 for a file or an empty
    /// directory, 1 when only direct children exist, and so on.
    pub fn height(self) -> usize {
        let NodeRef::Directory(dir) = self else {
            return 0;
        };
        let mut height = 0;
        let mut pending: Vec<(&DirectoryNode, usize)> = vec![(dir, 0)];
        while let Some((dir, depth)) = pending.pop() {
            for child in dir.children() {
                height = height.max(depth + 1);
                if let FsNode::Directory(sub) = child {
                    pending.push((sub, depth + 1));
                }
            }
        }
        height
    }
}

impl<'a> From<&'a FsNode> for NodeRef<'a> {
    fn from(node: &'a FsNode) -> Self {
        match node {
            FsNode::File(f) => NodeRef::File(f),
            FsNode::Directory(d) => NodeRef::Directory(d),
        }
    }
}

/// Read-only view of a node, as returned by directory listings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// Entry name
    pub name: String,
    /// File or directory
    pub kind: NodeKind,
    /// Bytes for files, child count for directories
    pub size: usize,
}

impl DirEntry {
    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

impl From<NodeRef<'_>> for DirEntry {
    fn from(node: NodeRef<'_>) -> Self {
        Self {
            name: String::from(node.name()),
            kind: node.kind(),
            size: node.size(),
        }
    }
}

impl From<&FsNode> for DirEntry {
    fn from(node: &FsNode) -> Self {
        Self::from(NodeRef::from(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_replaces_in_place() {
        let mut dir = DirectoryNode::new("d");
        dir.insert(FsNode::file("b", "1"));
        dir.insert(FsNode::file("a", "2"));
        dir.insert(FsNode::directory("c"));
        dir.insert(FsNode::file("a", "3"));

        let names: Vec<&str> = dir.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(dir.child("a").and_then(|n| n.as_file()).unwrap().content, "3");
    }

    #[test]
    fn test_remove() {
        let mut dir = DirectoryNode::new("d");
        dir.insert(FsNode::file("x", ""));
        assert!(dir.remove("x").is_some());
        assert!(dir.remove("x").is_none());
        assert!(dir.is_empty());
    }

    #[test]
    fn test_dir_entry_from_node() {
        let entry = DirEntry::from(&FsNode::file("todo.txt", "buy milk"));
        assert_eq!(entry.kind, NodeKind::File);
        assert_eq!(entry.size, 8);
        assert!(!entry.is_directory());
    }

    #[test]
    fn test_node_ref_height() {
        let mut inner = DirectoryNode::new("inner");
        inner.insert(FsNode::file("f", "x"));
        let mut outer = DirectoryNode::new("outer");
        outer.insert(FsNode::directory("empty"));
        outer.insert(FsNode::Directory(inner));
        let outer = FsNode::Directory(outer);

        assert_eq!(NodeRef::from(&outer).height(), 2);
        assert_eq!(NodeRef::from(&FsNode::directory("e")).height(), 0);
        assert_eq!(NodeRef::from(&FsNode::file("f", "")).height(), 0);
        assert_eq!(NodeRef::from(&outer).to_node(), outer);
    }
}
