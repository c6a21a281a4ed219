//! Read-only context handed to the chat agent.
//!
//! The agent never touches the tree directly. It gets a capped snapshot of
//! the whole filesystem, the session's working directory and the most
//! recent commands, built only through the snapshot and path queries.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use sandbox_vfs::{format_snapshot, KeyValueStore, SnapshotEntry, StorageUsage, Vfs};

use crate::history::{CommandHistory, HistoryEntry};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentContext {
    /// Canonical working directory of the session
    pub cwd: String,
    /// Totals for the whole tree
    pub usage: Option<StorageUsage>,
    pub snapshot: Vec<SnapshotEntry>,
    /// Most recent commands, oldest first
    pub history: Vec<HistoryEntry>,
}

impl AgentContext {
    /// Gather context using the filesystem's configured snapshot limits.
    pub fn collect<S: KeyValueStore>(
        vfs: &Vfs<S>,
        cwd: &str,
        history: &CommandHistory,
        history_len: usize,
    ) -> Self {
        Self {
            cwd: vfs.get_absolute_path("", cwd),
            usage: vfs.usage("/", "/"),
            snapshot: vfs.snapshot_with("/", &vfs.config().snapshot),
            history: history.recent(history_len),
        }
    }

    /// Plain-text rendering for inclusion in a prompt.
    pub fn to_prompt(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Working directory: {}", self.cwd);
        if let Some(usage) = &self.usage {
            let _ = writeln!(
                out,
                "Filesystem: {} files, {} directories, {} bytes",
                usage.file_count, usage.directory_count, usage.used_bytes
            );
        }

        out.push_str("\nFiles:\n");
        if self.snapshot.is_empty() {
            out.push_str("(empty)\n");
        } else {
            out.push_str(&format_snapshot(&self.snapshot));
        }

        if !self.history.is_empty() {
            out.push_str("\nRecent commands:\n");
            for entry in &self.history {
                let _ = writeln!(out, "{}$ {}", entry.cwd, entry.input);
                for line in &entry.output {
                    let _ = writeln!(out, "  {}", line);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandbox_vfs::MemoryStore;

    #[test]
    fn test_collect_and_render() {
        let mut vfs = Vfs::new(MemoryStore::new());
        vfs.write("/sandbox/todo.txt", "buy milk", "/").unwrap();
        let mut history = CommandHistory::new(10);
        history.push(HistoryEntry {
            cwd: String::from("/sandbox"),
            input: String::from("cat todo.txt"),
            output: vec![String::from("buy milk")],
        });

        let context = AgentContext::collect(&vfs, "/sandbox/./", &history, 5);
        assert_eq!(context.cwd, "/sandbox");
        assert_eq!(context.snapshot.len(), 2);
        let usage = context.usage.unwrap();
        assert_eq!(usage.file_count, 1);
        assert_eq!(usage.used_bytes, 8);

        let prompt = context.to_prompt();
        assert!(prompt.starts_with("Working directory: /sandbox\n"));
        assert!(prompt.contains("[dir]  /sandbox/\n"));
        assert!(prompt.contains("[file] /sandbox/todo.txt (8 bytes): buy milk\n"));
        assert!(prompt.contains("/sandbox$ cat todo.txt\n  buy milk\n"));
    }

    #[test]
    fn test_serializes_snapshot_entries() {
        let vfs = Vfs::new(MemoryStore::new());
        let context = AgentContext::collect(&vfs, "/", &CommandHistory::new(1), 1);
        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["cwd"], "/");
        assert_eq!(json["snapshot"][0]["path"], "/sandbox");
        assert_eq!(json["snapshot"][0]["type"], "directory");
        assert!(json["history"].as_array().unwrap().is_empty());
    }
}
