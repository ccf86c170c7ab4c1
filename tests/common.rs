#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn mj() -> Command {
    let mut cmd = cargo_bin_cmd!("mealjournal");
    // no user config, no API key, quiet logs
    cmd.env("HOME", test_home());
    cmd.env_remove("GROQ_API_KEY");
    cmd.env("MEALJOURNAL_LOG", "off");
    cmd
}

/// `$HOME` seen by the binary under test
pub fn test_home() -> PathBuf {
    env::temp_dir().join("mealjournal_test_home")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_mealjournal.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize a fresh DB without touching the user's config file
pub fn init_db(db_path: &str) {
    mj().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Add a meal by hand through the CLI
pub fn add_meal(db_path: &str, name: &str, kcal: &str) {
    mj().args(["--db", db_path, "add", "--name", name, "--kcal", kcal])
        .assert()
        .success();
}

/// Ids of today's entries, newest first
pub fn entry_ids(db_path: &str) -> Vec<String> {
    let out = mj()
        .args(["--db", db_path, "list", "--json"])
        .output()
        .expect("run list");
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json output");
    v["entries"]
        .as_array()
        .expect("entries array")
        .iter()
        .map(|e| e["id"].as_str().expect("id").to_string())
        .collect()
}
