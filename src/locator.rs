// ABOUTME: Engine lookup for the slideshot application
// ABOUTME: Resolves the LibreOffice executable from an override or platform search paths

use crate::errors::{Result, SlideError};
use log::{debug, info};
use std::fmt;
use std::path::{Path, PathBuf};

/// Resolved path to the LibreOffice executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnginePath(PathBuf);

impl EnginePath {
    /// Wrap a path without probing the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for EnginePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Where to look for the engine
pub struct LocatorConfig {
    /// Explicit engine path, checked before the search paths
    pub override_path: Option<PathBuf>,
    /// Candidate paths tested in order. `None` means the platform is unsupported.
    pub search_paths: Option<Vec<PathBuf>>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            override_path: None,
            search_paths: default_search_paths(),
        }
    }
}

/// Default install locations for the current platform.
pub fn default_search_paths() -> Option<Vec<PathBuf>> {
    if cfg!(target_os = "windows") {
        Some(vec![
            PathBuf::from(r"C:\Program Files\LibreOffice\program\soffice.exe"),
            PathBuf::from(r"C:\Program Files (x86)\LibreOffice\program\soffice.exe"),
        ])
    } else if cfg!(target_os = "linux") {
        Some(vec![
            PathBuf::from("/usr/bin/libreoffice"),
            PathBuf::from("/usr/local/bin/libreoffice"),
        ])
    } else {
        None
    }
}

/// Find the engine executable
pub fn locate(config: &LocatorConfig) -> Result<EnginePath> {
    if let Some(path) = &config.override_path {
        debug!("Checking engine override {:?}", path);
        if path.is_file() {
            info!("Using LibreOffice at {:?}", path);
            return Ok(EnginePath::new(path));
        }
        return Err(SlideError::EngineNotFound(format!(
            "configured executable {:?} does not exist",
            path
        )));
    }

    let candidates = config.search_paths.as_ref().ok_or_else(|| {
        SlideError::EngineNotFound(format!(
            "unsupported operating system: {}",
            std::env::consts::OS
        ))
    })?;

    for candidate in candidates {
        debug!("Probing {:?}", candidate);
        if candidate.is_file() {
            info!("Found LibreOffice at {:?}", candidate);
            return Ok(EnginePath::new(candidate));
        }
    }

    Err(SlideError::EngineNotFound(format!(
        "executable not found in any of {:?}",
        candidates
    )))
}
