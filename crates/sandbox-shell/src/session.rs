//! Interactive shell session.

use tracing::debug;

use sandbox_vfs::{KeyValueStore, Vfs};

use crate::agent::AgentContext;
use crate::config::ShellConfig;
use crate::history::{CommandHistory, HistoryEntry};
use crate::interpreter::{execute, CommandOutput};

/// A terminal session: one filesystem, one working directory, one history.
pub struct Shell<S: KeyValueStore> {
    vfs: Vfs<S>,
    cwd: String,
    history: CommandHistory,
    config: ShellConfig,
}

impl<S: KeyValueStore> Shell<S> {
    pub fn new(vfs: Vfs<S>, config: ShellConfig) -> Self {
        let cwd = home_dir(&vfs, &config.home);
        debug!(cwd = %cwd, "shell session started");
        Self {
            vfs,
            cwd,
            history: CommandHistory::new(config.history_capacity),
            config,
        }
    }

    /// Run one input line and adopt the resulting working directory.
    pub fn run(&mut self, line: &str) -> CommandOutput {
        let output = execute(&mut self.vfs, line, &self.cwd);
        self.history.push(HistoryEntry {
            cwd: self.cwd.clone(),
            input: String::from(line.trim()),
            output: output.lines.clone(),
        });
        self.cwd.clone_from(&output.cwd);
        output
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn vfs(&self) -> &Vfs<S> {
        &self.vfs
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn agent_context(&self) -> AgentContext {
        AgentContext::collect(&self.vfs, &self.cwd, &self.history, self.config.agent_history)
    }

    /// Reseed the filesystem and start over from the home directory.
    pub fn reset(&mut self) {
        self.vfs.reset();
        self.history.clear();
        self.cwd = home_dir(&self.vfs, &self.config.home);
    }

    pub fn into_vfs(self) -> Vfs<S> {
        self.vfs
    }
}

fn home_dir<S: KeyValueStore>(vfs: &Vfs<S>, home: &str) -> String {
    if vfs.is_directory(home, "/") {
        vfs.get_absolute_path(home, "/")
    } else {
        String::from("/")
    }
}
