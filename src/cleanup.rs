// ABOUTME: Temporary directory cleanup for the slideshot application
// ABOUTME: Removes a job's scratch directory and merges cleanup failures into the job result

use crate::errors::{Result, SlideError};
use log::{debug, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Recursively remove the temp directory. A directory that is already gone counts as clean.
pub fn cleanup(temp_dir: &Path) -> Result<()> {
    debug!("Removing {:?}", temp_dir);
    match fs::remove_dir_all(temp_dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SlideError::file_handling(
            format!("Failed to remove temporary directory {:?}", temp_dir),
            e,
        )),
    }
}

/// Combine the job outcome with the cleanup outcome without losing either error.
pub fn finish<T>(outcome: Result<T>, cleaned: Result<()>) -> Result<T> {
    match (outcome, cleaned) {
        (outcome, Ok(())) => outcome,
        (Ok(_), Err(cleanup)) => Err(cleanup),
        (Err(primary), Err(cleanup)) => {
            warn!("Cleanup failed after an earlier error: {}", cleanup);
            Err(SlideError::CleanupAfterFailure {
                primary: Box::new(primary),
                cleanup: Box::new(cleanup),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cleanup_failure() -> SlideError {
        SlideError::file_handling(
            "Failed to remove temporary directory",
            std::io::Error::new(ErrorKind::PermissionDenied, "locked"),
        )
    }

    #[test]
    fn removes_nested_contents() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let temp = dir.path().join("temp_conversion");
        fs::create_dir_all(temp.join("inner")).unwrap();
        fs::write(temp.join("inner").join("left.png"), "x").unwrap();

        cleanup(&temp).unwrap();

        assert!(!temp.exists());
    }

    #[test]
    fn missing_directory_is_fine() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        assert!(cleanup(&dir.path().join("never_made")).is_ok());
    }

    #[test]
    fn success_passes_through() {
        let result = finish(Ok(3), Ok(()));
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn cleanup_error_surfaces_after_success() {
        let err = finish(Ok(()), Err(cleanup_failure())).unwrap_err();
        assert!(matches!(err, SlideError::FileHandling { .. }));
        assert!(err.cleanup_error().is_none());
    }

    #[test]
    fn primary_error_is_kept_when_cleanup_fails() {
        let primary = SlideError::ConversionFailed {
            status: "exit status: 1".to_string(),
            output: "boom".to_string(),
        };

        let err = finish::<()>(Err(primary), Err(cleanup_failure())).unwrap_err();

        assert!(matches!(err.primary(), SlideError::ConversionFailed { .. }));
        assert!(matches!(
            err.cleanup_error(),
            Some(SlideError::FileHandling { .. })
        ));
        assert!(err.to_string().contains("boom"));
        assert!(err.to_string().contains("locked"));
    }

    #[test]
    fn primary_error_alone_when_cleanup_succeeds() {
        let err = finish::<()>(Err(SlideError::InputNotFound("x".into())), Ok(())).unwrap_err();
        assert!(matches!(err, SlideError::InputNotFound(_)));
        assert!(err.cleanup_error().is_none());
    }
}
