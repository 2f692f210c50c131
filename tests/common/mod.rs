// ABOUTME: Shared helpers for the slideshot integration tests
// ABOUTME: Builds stand-in engine scripts and serializes tests that spawn them

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

static SPAWN_LOCK: Mutex<()> = Mutex::new(());

/// Hold this while writing and running engine scripts. A fork from another
/// test thread while a script is still open for writing makes exec fail with
/// "text file busy".
pub fn spawn_lock() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Write an executable `/bin/sh` script that stands in for LibreOffice.
///
/// The engine is called as `--headless --convert-to png --outdir DIR SOURCE`,
/// so inside `body` the temp directory is `$5` and the source is `$6`.
pub fn fake_engine(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-soffice");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write engine script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make engine script executable");
    path
}

/// Engine that writes one PNG per `(file name, contents)` pair.
pub fn writing_engine(dir: &Path, files: &[(&str, &str)]) -> PathBuf {
    let body: String = files
        .iter()
        .map(|(name, contents)| format!("printf '%s' '{}' > \"$5/{}\"\n", contents, name))
        .collect();
    fake_engine(dir, &body)
}

/// Create a placeholder deck file.
pub fn deck(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"dummy PPTX content").expect("Failed to write deck");
    path
}

/// Sorted file names in a directory.
pub fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
