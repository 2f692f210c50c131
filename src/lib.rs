// ABOUTME: Library module for the slideshot program.
// ABOUTME: Rasterizes slide decks into per-slide PNG files by driving LibreOffice.

pub mod cleanup;
pub mod collate;
pub mod config;
pub mod converter;
pub mod errors;
pub mod invoke;
pub mod job;
pub mod locator;
pub mod utils;

// Reexport common types and functions
pub use collate::{ProducedImage, SlideOrder};
pub use config::{Config, ConvertOptions};
pub use converter::{convert_deck, SlideConverter};
pub use errors::{Result, SlideError};
pub use job::{ConversionJob, TEMP_DIR_NAME};
pub use locator::{locate, EnginePath, LocatorConfig};
