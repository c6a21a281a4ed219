//! Sandbox Virtual Filesystem
//!
//! The in-memory filesystem behind the desktop's terminal:
//!
//! - **Path**: lexical resolution of user paths against a caller-held cwd
//! - **Tree**: the node graph (a root directory owning files and directories)
//! - **Codec**: lossless conversion of the tree to and from plain data
//! - **Vfs**: list/read/write/mkdir/rm/mv/cp plus pure queries
//! - **Snapshot**: capped, flattened subtree listings for the chat agent
//! - **Storage**: the single-key persistence seam
//!
//! # Design Principles
//!
//! 1. **Stateless location**: the working directory belongs to the caller
//! 2. **Tree ownership**: no parent pointers, no shared nodes, no cycles
//! 3. **Persist on success**: every successful mutation writes the full tree
//! 4. **Typed failures**: mutations return [`VfsError`] kinds, queries never fail
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                             Vfs                                   │
//! │   list · read · write · touch · mkdir · rm · mv · cp · snapshot   │
//! │                                                                   │
//! │   ┌──────────────┐     ┌──────────────┐     ┌──────────────────┐  │
//! │   │  path        │ ──▶ │  Tree        │ ──▶ │  codec (serde)   │  │
//! │   │  resolve()   │     │  get_node()  │     │  encode / decode │  │
//! │   └──────────────┘     │  get_parent()│     └────────┬─────────┘  │
//! │                        └──────────────┘              │            │
//! └──────────────────────────────────────────────────────┼────────────┘
//!                                                        ▼
//!                                             ┌─────────────────────┐
//!                                             │  KeyValueStore      │
//!                                             │  (localStorage /    │
//!                                             │   MemoryStore)      │
//!                                             └─────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sandbox_vfs::{MemoryStore, Vfs};
//!
//! let mut vfs = Vfs::new(MemoryStore::new());
//! vfs.mkdir("notes", "/sandbox").unwrap();
//! vfs.write("notes/todo.txt", "buy milk", "/sandbox").unwrap();
//!
//! assert_eq!(vfs.read("/sandbox/notes/todo.txt", "/"), Some("buy milk"));
//! assert_eq!(vfs.get_absolute_path("..", "/sandbox/notes"), "/sandbox");
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod node;
pub mod path;
pub mod snapshot;
pub mod storage;
pub mod tree;

mod vfs;

// Re-export main types
pub use codec::{decode_tree, encode_tree, PersistedNode};
pub use config::{SnapshotLimits, VfsConfig, MAX_PATH_DEPTH, MAX_SNAPSHOT_DEPTH};
pub use error::{StorageError, VfsError, VfsResult};
pub use node::{DirEntry, DirectoryNode, FileNode, FsNode, NodeKind, NodeRef};
pub use path::{absolute_path, resolve};
pub use snapshot::{format_snapshot, SnapshotEntry};
pub use storage::{KeyValueStore, MemoryStore, StorageUsage};
pub use tree::Tree;
pub use vfs::Vfs;
