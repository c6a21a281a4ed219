//! Browser tests for localStorage persistence.
//!
//! Run with `wasm-pack test --headless --chrome crates/sandbox-web`.

#![cfg(target_arch = "wasm32")]

use sandbox_vfs::{KeyValueStore, Vfs, VfsConfig};
use sandbox_web::{LocalStorage, Terminal};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const KEY: &str = "sandbox.vfs.test";

fn config() -> VfsConfig {
    VfsConfig::default().with_storage_key(KEY)
}

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    let mut store = LocalStorage::new();
    store.store(KEY, "value").unwrap();
    assert_eq!(store.load(KEY).unwrap().as_deref(), Some("value"));
    store.remove(KEY).unwrap();
    assert_eq!(store.load(KEY).unwrap(), None);
}

#[wasm_bindgen_test]
fn tree_survives_reload() {
    let mut store = LocalStorage::new();
    store.remove(KEY).unwrap();

    let mut vfs = Vfs::load(LocalStorage::new(), config());
    vfs.write("/sandbox/kept.txt", "persisted", "/").unwrap();

    let reloaded = Vfs::load(LocalStorage::new(), config());
    assert_eq!(reloaded.read("/sandbox/kept.txt", "/"), Some("persisted"));
    store.remove(KEY).unwrap();
}

#[wasm_bindgen_test]
fn terminal_executes_commands() {
    let vfs_config = format!(r#"{{"storage_key": "{}"}}"#, KEY);
    let mut terminal = Terminal::with_config(&vfs_config, "").unwrap();
    terminal.reset();

    terminal.execute("mkdir notes").unwrap();
    terminal.execute("cd notes").unwrap();
    assert_eq!(terminal.cwd(), "/sandbox/notes");

    let json = terminal.execute("foobar").unwrap();
    let output: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(output["lines"][0], "foobar: command not found");
    assert_eq!(output["unrecognized"], "foobar");

    LocalStorage::new().remove(KEY).unwrap();
}
