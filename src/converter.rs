// ABOUTME: Conversion orchestrator for the slideshot application
// ABOUTME: Ties together lookup, preparation, invocation, collation and cleanup for one deck

use crate::cleanup;
use crate::collate;
use crate::config::{Config, ConvertOptions};
use crate::errors::Result;
use crate::invoke;
use crate::job::{self, ConversionJob};
use crate::locator::{self, EnginePath};
use log::info;
use std::path::{Path, PathBuf};

/// Converts slide decks to per-slide PNG files with one resolved engine.
#[derive(Debug, Clone)]
pub struct SlideConverter {
    engine: EnginePath,
    options: ConvertOptions,
}

impl SlideConverter {
    /// Locate the engine once and keep it for the converter's lifetime.
    pub fn new(config: &Config) -> Result<Self> {
        let engine = locator::locate(&config.locator_config())?;
        Ok(Self::with_engine(engine, config.convert_options()))
    }

    /// Use an already resolved engine, e.g. a stand-in executable in tests.
    pub fn with_engine(engine: EnginePath, options: ConvertOptions) -> Self {
        Self { engine, options }
    }

    pub fn engine(&self) -> &EnginePath {
        &self.engine
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert `source` into `<output_dir>/<base>_slide_<n>.png` files.
    ///
    /// Returns the produced paths in slide order. The temporary directory is
    /// removed on every path out of this function once it has been created;
    /// if that removal fails after an earlier error, both are reported.
    pub fn convert(&self, source: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let temp_name = job::temp_dir_name(self.options.unique_temp_dir);
        let job = job::prepare(source, output_dir, &temp_name)?;

        let outcome = self.run(&job);
        let cleaned = cleanup::cleanup(&job.temp_dir);
        let files = cleanup::finish(outcome, cleaned)?;

        info!(
            "Converted {:?} into {} slides in {:?}",
            job.source,
            files.len(),
            job.output_dir
        );
        Ok(files)
    }

    fn run(&self, job: &ConversionJob) -> Result<Vec<PathBuf>> {
        invoke::invoke(&self.engine, &job.source, &job.temp_dir, self.options.timeout)?;
        collate::collate(
            &job.temp_dir,
            &job.output_dir,
            &job.base_name,
            self.options.order,
        )
    }
}

/// Convert a deck using configuration from the environment
pub fn convert_deck(source: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let config = Config::from_env()?;
    SlideConverter::new(&config)?.convert(source, output_dir)
}
