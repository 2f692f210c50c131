// ABOUTME: Utility functions for the slideshot application
// ABOUTME: Filesystem helpers shared by job preparation, collation and cleanup

use crate::errors::{Result, SlideError};
use log::debug;
use std::fs;
use std::path::Path;

/// Validate that a source file exists and is a regular file
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(SlideError::InputNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Ensure a directory exists, creating it (and its parents) if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    debug!("Creating directory {:?}", path);
    fs::create_dir_all(path).map_err(|e| {
        SlideError::file_handling(format!("Failed to create directory {:?}", path), e)
    })
}

/// Move a file, falling back to copy and remove when a plain rename fails
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            debug!(
                "Rename {:?} -> {:?} failed ({}), copying instead",
                from, to, rename_err
            );
            if fs::copy(from, to).is_err() {
                return Err(SlideError::file_handling(
                    format!("Failed to move {:?} to {:?}", from, to),
                    rename_err,
                ));
            }
            fs::remove_file(from).map_err(|e| {
                SlideError::file_handling(format!("Failed to remove {:?} after copy", from), e)
            })
        }
    }
}

/// File stem of a path, used as the base name for produced images
pub fn base_name(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| SlideError::InputNotFound(path.to_path_buf()))
}
