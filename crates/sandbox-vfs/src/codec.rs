//! Tree serialization.
//!
//! The persisted form is plain data: files are `{type: "file", name,
//! content}` and directories are `{type: "directory", name, children}` where
//! `children` is a list of `[name, node]` pairs, so child order survives
//! stores that do not keep object key order.
//!
//! Decoding is lenient. Missing `content` becomes the empty string, a missing
//! or malformed `children` value becomes an empty directory, and individual
//! children that fail to decode are dropped.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::config::MAX_PATH_DEPTH;
use crate::error::StorageError;
use crate::node::{DirectoryNode, FileNode, FsNode};
use crate::tree::Tree;

/// Deepest bracket nesting a valid document can reach: each directory
/// level costs an object, its `children` array and one pair array.
const MAX_NESTING: usize = 3 * MAX_PATH_DEPTH + 2;

/// Plain-data form of a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PersistedNode {
    File {
        name: String,
        content: String,
    },
    Directory {
        name: String,
        children: Vec<(String, PersistedNode)>,
    },
}

impl PersistedNode {
    /// Leniently read a node from a JSON value.
    ///
    /// Returns `None` only when `value` is not an object with a known
    /// `type`; every other defect is repaired.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut map) = value else {
            return None;
        };
        let kind = match map.remove("type") {
            Some(Value::String(kind)) => kind,
            _ => return None,
        };
        let name = take_string(&mut map, "name");

        match kind.as_str() {
            "file" => Some(PersistedNode::File {
                name,
                content: take_string(&mut map, "content"),
            }),
            "directory" => {
                let children = match map.remove("children") {
                    Some(Value::Array(items)) => items.into_iter().filter_map(pair_from_value).collect(),
                    _ => Vec::new(),
                };
                Some(PersistedNode::Directory { name, children })
            }
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for PersistedNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        PersistedNode::from_value(value)
            .ok_or_else(|| serde::de::Error::custom("expected a file or directory node"))
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> String {
    match map.remove(key) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}

fn pair_from_value(item: Value) -> Option<(String, PersistedNode)> {
    let Value::Array(pair) = item else {
        return None;
    };
    let mut pair = pair.into_iter();
    let key = match pair.next()? {
        Value::String(key) => key,
        _ => return None,
    };
    let node = PersistedNode::from_value(pair.next()?)?;
    Some((key, node))
}

/// Convert a node (and its subtree) to plain data.
pub fn serialize(node: &FsNode) -> PersistedNode {
    match node {
        FsNode::File(file) => PersistedNode::File {
            name: file.name.clone(),
            content: file.content.clone(),
        },
        FsNode::Directory(dir) => serialize_directory(dir),
    }
}

fn serialize_directory(dir: &DirectoryNode) -> PersistedNode {
    PersistedNode::Directory {
        name: dir.name.clone(),
        children: dir
            .children()
            .iter()
            .map(|child| (String::from(child.name()), serialize(child)))
            .collect(),
    }
}

/// Rebuild a node from plain data.
///
/// Each child takes the name it is keyed under in its parent's pair list;
/// duplicate keys keep the last entry.
pub fn deserialize(data: PersistedNode) -> FsNode {
    match data {
        PersistedNode::File { name, content } => FsNode::File(FileNode { name, content }),
        PersistedNode::Directory { name, children } => {
            let mut dir = DirectoryNode::new(name);
            for (key, child) in children {
                if key.is_empty() || key.contains('/') || key == "." || key == ".." {
                    continue;
                }
                let mut node = deserialize(child);
                node.set_name(key);
                dir.insert(node);
            }
            FsNode::Directory(dir)
        }
    }
}

/// Encode a whole tree as JSON text for the backing store.
pub fn encode_tree(tree: &Tree) -> Result<String, StorageError> {
    Ok(serde_json::to_string(&serialize_directory(tree.root()))?)
}

/// Decode JSON text produced by [`encode_tree`].
///
/// Documents nested deeper than a tree of [`MAX_PATH_DEPTH`] levels can
/// produce are refused before parsing. A root that is not a directory is
/// rejected so the caller can fall back to a fresh tree.
pub fn decode_tree(text: &str) -> Result<Tree, StorageError> {
    let nesting = nesting_depth(text);
    if nesting > MAX_NESTING {
        return Err(StorageError::Serialization(format!(
            "document nested {} levels deep, limit is {}",
            nesting, MAX_NESTING
        )));
    }

    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;

    let data = PersistedNode::from_value(value)
        .ok_or_else(|| StorageError::Serialization(String::from("persisted root is not a node")))?;
    match deserialize(data) {
        FsNode::Directory(root) => Ok(Tree::from_root(root)),
        FsNode::File(_) => Err(StorageError::Serialization(String::from(
            "persisted root is not a directory",
        ))),
    }
}

/// Maximum bracket nesting in JSON text, ignoring brackets inside strings.
fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0;
    let mut in_string = false;
    let mut escaped = false;
    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                max = max.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}
