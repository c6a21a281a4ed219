//! Flattened, capped listings of a subtree.
//!
//! Snapshots give an outside reader (the chat agent) a read-only picture of
//! the filesystem. The walk is breadth-first so shallow entries survive
//! truncation, and it stops silently at the item and depth caps.

use std::collections::VecDeque;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::config::SnapshotLimits;
use crate::node::{DirectoryNode, FsNode, NodeKind, NodeRef};
use crate::path::to_absolute;
use crate::tree::Tree;

/// One node in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Absolute path
    pub path: String,
    /// File or directory
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Content length in bytes (files only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    /// Leading characters of the content (files only, when non-empty)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl SnapshotEntry {
    fn new(path: String, node: NodeRef<'_>, max_preview: usize) -> Self {
        match node {
            NodeRef::File(file) => {
                let preview: String = file.content.chars().take(max_preview).collect();
                Self {
                    path,
                    kind: NodeKind::File,
                    size: Some(file.content.len()),
                    preview: (!preview.is_empty()).then_some(preview),
                }
            }
            NodeRef::Directory(_) => Self {
                path,
                kind: NodeKind::Directory,
                size: None,
                preview: None,
            },
        }
    }
}

/// Collect entries below `root`.
///
/// A file root yields a single entry for itself, a missing root yields
/// nothing. Directory contents are listed level by level down to
/// `limits.effective_depth()` and never exceed `limits.max_items` entries.
pub fn collect(tree: &Tree, root: &[String], limits: &SnapshotLimits) -> Vec<SnapshotEntry> {
    let mut entries = Vec::new();
    if limits.max_items == 0 {
        return entries;
    }

    let Some(node) = tree.get_node(root) else {
        return entries;
    };
    let dir = match node {
        NodeRef::File(_) => {
            entries.push(SnapshotEntry::new(to_absolute(root), node, limits.max_preview));
            return entries;
        }
        NodeRef::Directory(dir) => dir,
    };

    let max_depth = limits.effective_depth();
    let mut queue: VecDeque<(String, &DirectoryNode, usize)> = VecDeque::new();
    queue.push_back((base_path(root), dir, 1));

    while let Some((prefix, dir, depth)) = queue.pop_front() {
        if depth > max_depth {
            continue;
        }
        for child in dir.children() {
            if entries.len() >= limits.max_items {
                return entries;
            }
            let path = format!("{}{}", prefix, child.name());
            if let FsNode::Directory(sub) = child {
                queue.push_back((format!("{}/", path), sub, depth + 1));
            }
            entries.push(SnapshotEntry::new(path, NodeRef::from(child), limits.max_preview));
        }
    }

    entries
}

fn base_path(root: &[String]) -> String {
    if root.is_empty() {
        String::from("/")
    } else {
        format!("{}/", to_absolute(root))
    }
}

/// Render entries as plain text, one line per entry.
pub fn format_snapshot(entries: &[SnapshotEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        match entry.kind {
            NodeKind::Directory => {
                let _ = writeln!(out, "[dir]  {}/", entry.path);
            }
            NodeKind::File => {
                let _ = write!(out, "[file] {} ({} bytes)", entry.path, entry.size.unwrap_or(0));
                if let Some(preview) = &entry.preview {
                    let _ = write!(out, ": {}", preview.replace('\n', "\\n"));
                }
                out.push('\n');
            }
        }
    }
    out
}
