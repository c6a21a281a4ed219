//! Command interpreter.
//!
//! Stateless per call: a raw line and the caller's working directory go in,
//! output lines, the (possibly changed) working directory and a clear-screen
//! flag come out. Filesystem failures are turned into text here; nothing
//! escapes as an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use sandbox_vfs::{KeyValueStore, Vfs, VfsError};

use crate::builtins::Builtin;
use crate::tokenizer::tokenize;

/// Result of running one input line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    /// Lines to print, in order
    pub lines: Vec<String>,
    /// Working directory after the command
    pub cwd: String,
    /// The caller should discard everything printed so far
    pub clear: bool,
    /// The trimmed input when the command name was not a builtin, so the
    /// host can hand it to the chat agent
    pub unrecognized: Option<String>,
}

impl CommandOutput {
    fn new(cwd: &str) -> Self {
        Self {
            cwd: String::from(cwd),
            ..Self::default()
        }
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

/// Run one input line against `vfs`.
pub fn execute<S: KeyValueStore>(vfs: &mut Vfs<S>, line: &str, cwd: &str) -> CommandOutput {
    let mut out = CommandOutput::new(cwd);
    let tokens = tokenize(line);
    let Some((first, args)) = tokens.split_first() else {
        return out;
    };
    let name = first.to_lowercase();

    let Some(builtin) = Builtin::from_name(&name) else {
        debug!(command = %name, "unrecognized command");
        out.push(format!("{}: command not found", name));
        out.unrecognized = Some(String::from(line.trim()));
        return out;
    };

    debug!(command = builtin.name(), args = args.len(), "dispatch");
    let mut cmd = Invocation {
        vfs,
        args,
        cwd,
        out: &mut out,
    };
    match builtin {
        Builtin::Help => cmd.help(),
        Builtin::Pwd => cmd.pwd(),
        Builtin::Ls => cmd.ls(),
        Builtin::Cd => cmd.cd(),
        Builtin::Mkdir => cmd.mkdir(),
        Builtin::Rmdir => cmd.rmdir(),
        Builtin::Touch => cmd.touch(),
        Builtin::Cat => cmd.cat("cat"),
        Builtin::Read => cmd.cat("read"),
        Builtin::Echo => cmd.echo(),
        Builtin::Write => cmd.write(),
        Builtin::Rm => cmd.rm(),
        Builtin::Mv => cmd.transfer("mv", "move"),
        Builtin::Cp => cmd.transfer("cp", "copy"),
        Builtin::Clear => cmd.out.clear = true,
    }
    out
}

/// One builtin invocation in progress.
struct Invocation<'a, S: KeyValueStore> {
    vfs: &'a mut Vfs<S>,
    args: &'a [String],
    cwd: &'a str,
    out: &'a mut CommandOutput,
}

impl<S: KeyValueStore> Invocation<'_, S> {
    /// Emit `<cmd>: missing operand` when there are no arguments.
    fn require_operand(&mut self, cmd: &str) -> bool {
        if self.args.is_empty() {
            self.out.push(format!("{}: missing operand", cmd));
            return false;
        }
        true
    }

    fn help(&mut self) {
        if let Some(topic) = self.args.first() {
            match Builtin::from_name(topic) {
                Some(builtin) => {
                    self.out.push(format!("usage: {}", builtin.usage()));
                    self.out.push(format!("  {}", builtin.description()));
                }
                None => self.out.push(format!("help: no such command: {}", topic)),
            }
            return;
        }

        self.out.push("Available commands:");
        for builtin in Builtin::ALL {
            self.out
                .push(format!("  {:<8}{}", builtin.name(), builtin.description()));
        }
    }

    fn pwd(&mut self) {
        let cwd = self.vfs.get_absolute_path("", self.cwd);
        self.out.push(cwd);
    }

    fn ls(&mut self) {
        let target = self.args.first().map(String::as_str).unwrap_or(".");
        if !self.vfs.exists(target, self.cwd) {
            self.out.push(format!(
                "ls: cannot access '{}': No such file or directory",
                target
            ));
            return;
        }
        for entry in self.vfs.list(target, self.cwd) {
            if entry.is_directory() {
                self.out.push(format!("[dir]  {}/", entry.name));
            } else {
                self.out.push(format!("[file] {}", entry.name));
            }
        }
    }

    fn cd(&mut self) {
        let target = self.args.first().map(String::as_str).unwrap_or("/");
        if self.vfs.is_directory(target, self.cwd) {
            self.out.cwd = self.vfs.get_absolute_path(target, self.cwd);
        } else if self.vfs.exists(target, self.cwd) {
            self.out.push(format!("cd: not a directory: {}", target));
        } else {
            self.out
                .push(format!("cd: no such file or directory: {}", target));
        }
    }

    fn mkdir(&mut self) {
        if !self.require_operand("mkdir") {
            return;
        }
        for path in self.args {
            if let Err(e) = self.vfs.mkdir(path, self.cwd) {
                self.out.push(format!(
                    "mkdir: cannot create directory '{}': {}",
                    path,
                    e.reason()
                ));
            }
        }
    }

    fn rmdir(&mut self) {
        if !self.require_operand("rmdir") {
            return;
        }
        for path in self.args {
            if let Err(e) = self.vfs.rmdir(path, self.cwd) {
                self.out
                    .push(format!("rmdir: failed to remove '{}': {}", path, e.reason()));
            }
        }
    }

    fn touch(&mut self) {
        if !self.require_operand("touch") {
            return;
        }
        for path in self.args {
            if let Err(e) = self.vfs.touch(path, self.cwd) {
                self.out
                    .push(format!("touch: cannot touch '{}': {}", path, e.reason()));
            }
        }
    }

    fn cat(&mut self, cmd: &str) {
        if !self.require_operand(cmd) {
            return;
        }
        for path in self.args {
            match self.vfs.read(path, self.cwd) {
                Some(content) => self.out.lines.extend(content.split('\n').map(String::from)),
                None => {
                    let reason = if self.vfs.is_directory(path, self.cwd) {
                        VfsError::NotAFile.reason()
                    } else {
                        VfsError::NotFound.reason()
                    };
                    self.out.push(format!("{}: {}: {}", cmd, path, reason));
                }
            }
        }
    }

    fn echo(&mut self) {
        self.out.push(self.args.join(" "));
    }

    fn write(&mut self) {
        let Some((path, text)) = self.args.split_first() else {
            self.out.push("write: missing operand");
            return;
        };
        let content = text.join(" ");
        if let Err(e) = self.vfs.write(path, &content, self.cwd) {
            self.out
                .push(format!("write: cannot write '{}': {}", path, e.reason()));
        }
    }

    fn rm(&mut self) {
        if !self.require_operand("rm") {
            return;
        }
        for path in self.args {
            if let Err(e) = self.vfs.rm(path, self.cwd) {
                self.out
                    .push(format!("rm: cannot remove '{}': {}", path, e.reason()));
            }
        }
    }

    /// Shared body of `mv` and `cp`.
    fn transfer(&mut self, cmd: &str, verb: &str) {
        let (src, dst) = match self.args {
            [] => {
                self.out.push(format!("{}: missing operand", cmd));
                return;
            }
            [src] => {
                self.out.push(format!(
                    "{}: missing destination file operand after '{}'",
                    cmd, src
                ));
                return;
            }
            [src, dst, ..] => (src, dst),
        };

        let result = if cmd == "mv" {
            self.vfs.mv(src, dst, self.cwd)
        } else {
            self.vfs.cp(src, dst, self.cwd)
        };
        if let Err(e) = result {
            self.out.push(format!(
                "{}: cannot {} '{}' to '{}': {}",
                cmd,
                verb,
                src,
                dst,
                e.reason()
            ));
        }
    }
}

#[cfg(test)]
#[path = "interpreter_tests.rs"]
mod interpreter_tests;
