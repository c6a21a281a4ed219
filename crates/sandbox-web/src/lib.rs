//! Browser bindings for the sandbox terminal.
//!
//! Exposes a [`Terminal`] to JavaScript. The filesystem persists to
//! `window.localStorage`; command results and agent context cross the
//! boundary as JSON strings.
//!
//! ```text
//!  React terminal ──execute(line)──▶ Terminal ──▶ Shell ──▶ Vfs ──▶ LocalStorage
//!        ▲                             │
//!        └──── CommandOutput (JSON) ◀──┘
//! ```

use wasm_bindgen::prelude::*;

use sandbox_shell::{Shell, ShellConfig};
use sandbox_vfs::{format_snapshot, SnapshotLimits, Vfs, VfsConfig};

mod storage;

pub use storage::LocalStorage;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// A terminal session bound to browser storage.
#[wasm_bindgen]
pub struct Terminal {
    shell: Shell<LocalStorage>,
}

#[wasm_bindgen]
impl Terminal {
    /// Open a session with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Terminal {
        init_panic_hook();
        let vfs = Vfs::load(LocalStorage::new(), VfsConfig::default());
        Terminal {
            shell: Shell::new(vfs, ShellConfig::default()),
        }
    }

    /// Open a session from JSON configs; either may be empty for defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(vfs_config: &str, shell_config: &str) -> Result<Terminal, JsValue> {
        init_panic_hook();
        let vfs_config = if vfs_config.trim().is_empty() {
            VfsConfig::default()
        } else {
            VfsConfig::from_json(vfs_config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let shell_config = if shell_config.trim().is_empty() {
            ShellConfig::default()
        } else {
            ShellConfig::from_json(shell_config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        let vfs = Vfs::load(LocalStorage::new(), vfs_config);
        Ok(Terminal {
            shell: Shell::new(vfs, shell_config),
        })
    }

    /// Run one line; returns the `CommandOutput` as JSON.
    pub fn execute(&mut self, line: &str) -> Result<String, JsValue> {
        let output = self.shell.run(line);
        if output.unrecognized.is_some() {
            log(&format!("[terminal] forwarding to agent: {}", line.trim()));
        }
        to_json(&output)
    }

    #[wasm_bindgen(getter)]
    pub fn cwd(&self) -> String {
        String::from(self.shell.cwd())
    }

    /// Snapshot of `root` as JSON (an array of entries).
    pub fn snapshot(&self, root: &str, max_items: usize, max_preview: usize) -> Result<String, JsValue> {
        to_json(&self.shell.vfs().snapshot(root, max_items, max_preview))
    }

    /// Snapshot of `root` rendered as text, using the configured limits.
    #[wasm_bindgen(js_name = snapshotText)]
    pub fn snapshot_text(&self, root: &str) -> String {
        let limits: &SnapshotLimits = &self.shell.vfs().config().snapshot;
        format_snapshot(&self.shell.vfs().snapshot_with(root, limits))
    }

    /// Agent context as JSON.
    #[wasm_bindgen(js_name = agentContext)]
    pub fn agent_context(&self) -> Result<String, JsValue> {
        to_json(&self.shell.agent_context())
    }

    /// Agent context rendered for a prompt.
    #[wasm_bindgen(js_name = agentPrompt)]
    pub fn agent_prompt(&self) -> String {
        self.shell.agent_context().to_prompt()
    }

    /// Wipe the filesystem back to its seed directories.
    pub fn reset(&mut self) {
        log("[terminal] resetting filesystem");
        self.shell.reset();
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
