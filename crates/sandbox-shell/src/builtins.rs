//! The fixed builtin command table.
//!
//! Lookup is case-insensitive set membership: a name either maps to exactly
//! one builtin or is unknown, and unknown names are never partially run.

/// A builtin terminal command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Help,
    Pwd,
    Ls,
    Cd,
    Mkdir,
    Rmdir,
    Touch,
    Cat,
    Echo,
    Write,
    Read,
    Rm,
    Mv,
    Cp,
    Clear,
}

impl Builtin {
    /// Every builtin, in the order `help` lists them.
    pub const ALL: [Builtin; 15] = [
        Builtin::Help,
        Builtin::Pwd,
        Builtin::Ls,
        Builtin::Cd,
        Builtin::Mkdir,
        Builtin::Rmdir,
        Builtin::Touch,
        Builtin::Cat,
        Builtin::Echo,
        Builtin::Write,
        Builtin::Read,
        Builtin::Rm,
        Builtin::Mv,
        Builtin::Cp,
        Builtin::Clear,
    ];

    /// Find a builtin by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Help => "help",
            Builtin::Pwd => "pwd",
            Builtin::Ls => "ls",
            Builtin::Cd => "cd",
            Builtin::Mkdir => "mkdir",
            Builtin::Rmdir => "rmdir",
            Builtin::Touch => "touch",
            Builtin::Cat => "cat",
            Builtin::Echo => "echo",
            Builtin::Write => "write",
            Builtin::Read => "read",
            Builtin::Rm => "rm",
            Builtin::Mv => "mv",
            Builtin::Cp => "cp",
            Builtin::Clear => "clear",
        }
    }

    /// Short description (shown in the help list).
    pub fn description(self) -> &'static str {
        match self {
            Builtin::Help => "Show available commands",
            Builtin::Pwd => "Print the working directory",
            Builtin::Ls => "List directory contents",
            Builtin::Cd => "Change the working directory",
            Builtin::Mkdir => "Create directories (with parents)",
            Builtin::Rmdir => "Remove empty directories",
            Builtin::Touch => "Create empty files",
            Builtin::Cat => "Print file contents",
            Builtin::Echo => "Print arguments",
            Builtin::Write => "Write text to a file",
            Builtin::Read => "Print file contents (same as cat)",
            Builtin::Rm => "Remove files or empty directories",
            Builtin::Mv => "Move or rename a file or directory",
            Builtin::Cp => "Copy a file or directory",
            Builtin::Clear => "Clear the terminal",
        }
    }

    /// Usage line (shown by `help <command>`).
    pub fn usage(self) -> &'static str {
        match self {
            Builtin::Help => "help [command]",
            Builtin::Pwd => "pwd",
            Builtin::Ls => "ls [path]",
            Builtin::Cd => "cd [path]",
            Builtin::Mkdir => "mkdir <path>...",
            Builtin::Rmdir => "rmdir <path>...",
            Builtin::Touch => "touch <path>...",
            Builtin::Cat => "cat <path>...",
            Builtin::Echo => "echo [text]...",
            Builtin::Write => "write <path> [text]...",
            Builtin::Read => "read <path>...",
            Builtin::Rm => "rm <path>...",
            Builtin::Mv => "mv <source> <destination>",
            Builtin::Cp => "cp <source> <destination>",
            Builtin::Clear => "clear",
        }
    }
}

/// Whether `name` is a builtin command (case-insensitive).
pub fn is_builtin(name: &str) -> bool {
    Builtin::from_name(name).is_some()
}
