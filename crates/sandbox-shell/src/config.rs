//! Shell session configuration.

use serde::{Deserialize, Serialize};

use sandbox_vfs::{VfsError, VfsResult};

/// Default number of history entries kept per session.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Default number of history entries handed to the agent.
pub const DEFAULT_AGENT_HISTORY: usize = 10;

/// Directory a new session starts in when it exists.
pub const DEFAULT_HOME: &str = "/sandbox";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub history_capacity: usize,
    pub agent_history: usize,
    /// Falls back to `/` when missing or not a directory
    pub home: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            agent_history: DEFAULT_AGENT_HISTORY,
            home: String::from(DEFAULT_HOME),
        }
    }
}

impl ShellConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json(text: &str) -> VfsResult<Self> {
        serde_json::from_str(text).map_err(|e| VfsError::storage(format!("invalid config: {}", e)))
    }
}
