// ABOUTME: Job preparation for the slideshot application
// ABOUTME: Validates the source deck and creates the output and temporary directories

use crate::errors::Result;
use crate::utils;
use log::info;
use std::path::{Path, PathBuf};

/// Name of the scratch directory the engine writes into.
pub const TEMP_DIR_NAME: &str = "temp_conversion";

/// One deck-to-directory conversion and its working state.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    /// Source file name without its extension
    pub base_name: String,
    pub temp_dir: PathBuf,
}

/// Temp directory name for a job, unique per call when requested.
pub fn temp_dir_name(unique: bool) -> String {
    if unique {
        format!("{}_{}", TEMP_DIR_NAME, uuid::Uuid::new_v4().simple())
    } else {
        TEMP_DIR_NAME.to_string()
    }
}

/// Validate the source and create the directories a job needs.
///
/// The source is checked before anything touches the disk, so a missing deck
/// never leaves an empty output directory behind.
pub fn prepare(source: &Path, output_dir: &Path, temp_dir_name: &str) -> Result<ConversionJob> {
    utils::validate_file_exists(source)?;
    let base_name = utils::base_name(source)?;

    utils::ensure_directory_exists(output_dir)?;
    let temp_dir = output_dir.join(temp_dir_name);
    utils::ensure_directory_exists(&temp_dir)?;

    info!("Prepared job for {:?} in {:?}", source, output_dir);

    Ok(ConversionJob {
        source: source.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        base_name,
        temp_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SlideError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn prepare_creates_nested_directories() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let deck = dir.path().join("quarterly.pptx");
        fs::write(&deck, b"deck").unwrap();
        let output = dir.path().join("a").join("b");

        let job = prepare(&deck, &output, TEMP_DIR_NAME).unwrap();

        assert_eq!(job.base_name, "quarterly");
        assert!(output.is_dir());
        assert_eq!(job.temp_dir, output.join("temp_conversion"));
        assert!(job.temp_dir.is_dir());
    }

    #[test]
    fn missing_source_touches_nothing() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let output = dir.path().join("out");

        let err = prepare(&dir.path().join("nope.pptx"), &output, TEMP_DIR_NAME).unwrap_err();

        assert!(matches!(err, SlideError::InputNotFound(_)));
        assert!(!output.exists());
    }

    #[test]
    fn directory_source_is_not_a_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let err = prepare(dir.path(), &dir.path().join("out"), TEMP_DIR_NAME).unwrap_err();
        assert!(matches!(err, SlideError::InputNotFound(_)));
    }

    #[test]
    fn output_under_a_file_is_file_handling() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let deck = dir.path().join("deck.pptx");
        fs::write(&deck, b"deck").unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let err = prepare(&deck, &blocker.join("out"), TEMP_DIR_NAME).unwrap_err();

        assert!(matches!(err, SlideError::FileHandling { .. }));
    }

    #[test]
    fn unique_temp_names_differ() {
        let a = temp_dir_name(true);
        let b = temp_dir_name(true);
        assert!(a.starts_with("temp_conversion_"));
        assert_ne!(a, b);
        assert_eq!(temp_dir_name(false), "temp_conversion");
    }
}
