//! Decision-model fixtures shared by tests across the workspace.
//!
//! Fixtures are plain JSON in the authoring format, so they double as examples
//! of what the model source is expected to send.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Walk up from whichever crate is under test until test-fixtures is a child.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);
    while !path.join("test-fixtures").is_dir() {
        if !path.pop() {
            panic!("no test-fixtures directory above CARGO_MANIFEST_DIR={manifest_dir}");
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture.
///
/// # Panics
/// Panics if the file is missing or does not deserialize as `T`.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
}

/// Raw fixture text, for tests that exercise deserialization themselves.
pub fn load_fixture_text(relative_path: &str) -> String {
    let path = fixture_path(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Load `models/<name>.json`.
pub fn load_model<T: DeserializeOwned>(name: &str) -> T {
    load_fixture(&format!("models/{name}.json"))
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    let Ok(entries) = std::fs::read_dir(&dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}
