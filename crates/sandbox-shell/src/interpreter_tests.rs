use super::*;
use sandbox_vfs::MemoryStore;

fn fresh() -> Vfs<MemoryStore> {
    Vfs::new(MemoryStore::new())
}

fn run(vfs: &mut Vfs<MemoryStore>, line: &str, cwd: &str) -> Vec<String> {
    execute(vfs, line, cwd).lines
}

#[test]
fn test_blank_line_is_a_no_op() {
    let mut vfs = fresh();
    let out = execute(&mut vfs, "   ", "/sandbox");
    assert!(out.lines.is_empty());
    assert_eq!(out.cwd, "/sandbox");
    assert!(!out.clear);
    assert!(out.unrecognized.is_none());
}

#[test]
fn test_unknown_command() {
    let mut vfs = fresh();
    let before = vfs.tree().clone();
    let out = execute(&mut vfs, "FooBar --now", "/sandbox");

    assert_eq!(out.lines, vec!["foobar: command not found"]);
    assert_eq!(out.cwd, "/sandbox");
    assert_eq!(out.unrecognized.as_deref(), Some("FooBar --now"));
    assert_eq!(vfs.tree(), &before);
}

#[test]
fn test_command_names_are_case_insensitive() {
    let mut vfs = fresh();
    assert_eq!(run(&mut vfs, "PWD", "/sandbox"), vec!["/sandbox"]);
    assert!(run(&mut vfs, "MkDir x", "/sandbox").is_empty());
    assert!(vfs.is_directory("/sandbox/x", "/"));
}

#[test]
fn test_help() {
    let mut vfs = fresh();
    let lines = run(&mut vfs, "help", "/");
    assert_eq!(lines[0], "Available commands:");
    assert_eq!(lines.len(), Builtin::ALL.len() + 1);
    assert!(lines.iter().any(|l| l.starts_with("  mkdir   ")));

    assert_eq!(
        run(&mut vfs, "help mv", "/"),
        vec![
            "usage: mv <source> <destination>",
            "  Move or rename a file or directory"
        ]
    );
    assert_eq!(run(&mut vfs, "help nope", "/"), vec!["help: no such command: nope"]);
}

#[test]
fn test_pwd_canonicalizes() {
    let mut vfs = fresh();
    assert_eq!(run(&mut vfs, "pwd", "/sandbox/./x/.."), vec!["/sandbox"]);
}

#[test]
fn test_ls_markers() {
    let mut vfs = fresh();
    vfs.mkdir("/sandbox/notes", "/").unwrap();
    vfs.write("/sandbox/a.txt", "x", "/").unwrap();

    assert_eq!(
        run(&mut vfs, "ls", "/sandbox"),
        vec!["[dir]  notes/", "[file] a.txt"]
    );
    assert_eq!(run(&mut vfs, "ls a.txt", "/sandbox"), vec!["[file] a.txt"]);
    assert!(run(&mut vfs, "ls notes", "/sandbox").is_empty());
    assert_eq!(
        run(&mut vfs, "ls ghost", "/sandbox"),
        vec!["ls: cannot access 'ghost': No such file or directory"]
    );
}

#[test]
fn test_cd() {
    let mut vfs = fresh();
    vfs.write("/sandbox/f", "x", "/").unwrap();

    let out = execute(&mut vfs, "cd ..", "/sandbox");
    assert_eq!(out.cwd, "/");
    assert!(out.lines.is_empty());

    let out = execute(&mut vfs, "cd", "/sandbox");
    assert_eq!(out.cwd, "/");

    let out = execute(&mut vfs, "cd f", "/sandbox");
    assert_eq!(out.cwd, "/sandbox");
    assert_eq!(out.lines, vec!["cd: not a directory: f"]);

    let out = execute(&mut vfs, "cd nowhere", "/sandbox");
    assert_eq!(out.cwd, "/sandbox");
    assert_eq!(out.lines, vec!["cd: no such file or directory: nowhere"]);
}

#[test]
fn test_missing_operands() {
    let mut vfs = fresh();
    for cmd in ["mkdir", "rmdir", "touch", "cat", "read", "write", "rm", "mv", "cp"] {
        assert_eq!(
            run(&mut vfs, cmd, "/"),
            vec![format!("{}: missing operand", cmd)],
            "{}",
            cmd
        );
    }
    assert_eq!(
        run(&mut vfs, "mv a", "/"),
        vec!["mv: missing destination file operand after 'a'"]
    );
    assert_eq!(
        run(&mut vfs, "cp a", "/"),
        vec!["cp: missing destination file operand after 'a'"]
    );
}

#[test]
fn test_mkdir_errors_per_operand() {
    let mut vfs = fresh();
    vfs.write("/sandbox/f", "x", "/").unwrap();
    assert_eq!(
        run(&mut vfs, "mkdir ok f/sub", "/sandbox"),
        vec!["mkdir: cannot create directory 'f/sub': Not a directory"]
    );
    assert!(vfs.is_directory("/sandbox/ok", "/"));
}

#[test]
fn test_rmdir_and_rm_messages() {
    let mut vfs = fresh();
    vfs.mkdir("/sandbox/d", "/").unwrap();
    vfs.write("/sandbox/d/f", "x", "/").unwrap();

    assert_eq!(
        run(&mut vfs, "rmdir d", "/sandbox"),
        vec!["rmdir: failed to remove 'd': Directory not empty"]
    );
    assert_eq!(
        run(&mut vfs, "rmdir d/f", "/sandbox"),
        vec!["rmdir: failed to remove 'd/f': Not a directory"]
    );
    assert_eq!(
        run(&mut vfs, "rm /", "/sandbox"),
        vec!["rm: cannot remove '/': Operation not permitted"]
    );
    assert_eq!(
        run(&mut vfs, "rm ghost", "/sandbox"),
        vec!["rm: cannot remove 'ghost': No such file or directory"]
    );
    assert!(run(&mut vfs, "rm d/f", "/sandbox").is_empty());
    assert!(run(&mut vfs, "rmdir d", "/sandbox").is_empty());
    assert!(!vfs.exists("/sandbox/d", "/"));
}

#[test]
fn test_touch_and_write() {
    let mut vfs = fresh();
    assert!(run(&mut vfs, "touch a b", "/sandbox").is_empty());
    assert_eq!(vfs.read("/sandbox/a", "/"), Some(""));

    assert!(run(&mut vfs, "write a hello   there", "/sandbox").is_empty());
    assert_eq!(vfs.read("/sandbox/a", "/"), Some("hello there"));

    assert!(run(&mut vfs, r#"write b "two  spaces""#, "/sandbox").is_empty());
    assert_eq!(vfs.read("/sandbox/b", "/"), Some("two  spaces"));

    assert_eq!(
        run(&mut vfs, "write ghost/f x", "/sandbox"),
        vec!["write: cannot write 'ghost/f': No such file or directory"]
    );
    assert_eq!(
        run(&mut vfs, "touch ghost/f", "/sandbox"),
        vec!["touch: cannot touch 'ghost/f': No such file or directory"]
    );
}

#[test]
fn test_cat_and_read() {
    let mut vfs = fresh();
    vfs.write("/sandbox/poem", "roses\nviolets", "/").unwrap();

    assert_eq!(run(&mut vfs, "cat poem", "/sandbox"), vec!["roses", "violets"]);
    assert_eq!(run(&mut vfs, "read poem", "/sandbox"), vec!["roses", "violets"]);
    assert_eq!(
        run(&mut vfs, "cat /sandbox", "/"),
        vec!["cat: /sandbox: Is a directory"]
    );
    assert_eq!(
        run(&mut vfs, "read ghost", "/sandbox"),
        vec!["read: ghost: No such file or directory"]
    );
}

#[test]
fn test_echo() {
    let mut vfs = fresh();
    assert_eq!(run(&mut vfs, "echo  hello   world", "/"), vec!["hello world"]);
    assert_eq!(run(&mut vfs, "echo 'a  b' c", "/"), vec!["a  b c"]);
    assert_eq!(run(&mut vfs, "echo", "/"), vec![""]);
}

#[test]
fn test_mv_and_cp_messages() {
    let mut vfs = fresh();
    vfs.write("/sandbox/a", "A", "/").unwrap();
    vfs.write("/sandbox/b", "B", "/").unwrap();

    assert_eq!(
        run(&mut vfs, "mv a b", "/sandbox"),
        vec!["mv: cannot move 'a' to 'b': File exists"]
    );
    assert_eq!(
        run(&mut vfs, "cp ghost c", "/sandbox"),
        vec!["cp: cannot copy 'ghost' to 'c': No such file or directory"]
    );

    assert!(run(&mut vfs, "cp a c", "/sandbox").is_empty());
    assert!(run(&mut vfs, "mv a d", "/sandbox").is_empty());
    assert_eq!(vfs.read("/sandbox/c", "/"), Some("A"));
    assert_eq!(vfs.read("/sandbox/d", "/"), Some("A"));
    assert!(!vfs.exists("/sandbox/a", "/"));
}

#[test]
fn test_clear() {
    let mut vfs = fresh();
    let out = execute(&mut vfs, "clear", "/sandbox");
    assert!(out.clear);
    assert!(out.lines.is_empty());
    assert_eq!(out.cwd, "/sandbox");
}
