//! Sandbox Shell
//!
//! Command-line layer over [`sandbox_vfs`]:
//!
//! - **Tokenizer**: whitespace splitting with `'`/`"` quoted regions
//! - **Builtins**: the fixed, case-insensitive command table
//! - **Interpreter**: one line in, printed lines and the new cwd out
//! - **History**: bounded record of executed lines
//! - **Agent**: read-only filesystem context for the chat agent
//! - **Session**: [`Shell`] ties a [`Vfs`](sandbox_vfs::Vfs) to a cwd and history
//!
//! Unknown command names are never run. The interpreter reports them and
//! returns the raw line in [`CommandOutput::unrecognized`] so the host can
//! forward it elsewhere.
//!
//! ## Example
//!
//! ```rust
//! use sandbox_shell::{Shell, ShellConfig};
//! use sandbox_vfs::{MemoryStore, Vfs};
//!
//! let mut shell = Shell::new(Vfs::new(MemoryStore::new()), ShellConfig::default());
//! shell.run("mkdir notes");
//! shell.run("cd notes");
//! shell.run("write todo.txt \"buy milk\"");
//!
//! assert_eq!(shell.cwd(), "/sandbox/notes");
//! assert_eq!(shell.run("cat todo.txt").lines, vec!["buy milk"]);
//! ```

pub mod agent;
pub mod builtins;
pub mod config;
pub mod history;
pub mod interpreter;
pub mod session;
pub mod tokenizer;

pub use agent::AgentContext;
pub use builtins::{is_builtin, Builtin};
pub use config::ShellConfig;
pub use history::{CommandHistory, HistoryEntry};
pub use interpreter::{execute, CommandOutput};
pub use session::Shell;
pub use tokenizer::tokenize;
