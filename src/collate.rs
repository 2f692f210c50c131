// ABOUTME: Output collation for the slideshot application
// ABOUTME: Renames engine output into <base>_slide_<n>.png and moves it to the output directory

use crate::errors::{Result, SlideError};
use crate::utils;
use log::{debug, info, warn};
use std::cmp::Ordering;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How engine output files are ordered before numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideOrder {
    /// Plain file name order: `deck10.png` sorts before `deck2.png`.
    #[default]
    Lexicographic,
    /// Digit runs compare by value: `deck2.png` sorts before `deck10.png`.
    Natural,
}

impl FromStr for SlideOrder {
    type Err = SlideError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lexicographic" | "lex" => Ok(SlideOrder::Lexicographic),
            "natural" => Ok(SlideOrder::Natural),
            other => Err(SlideError::ConfigError(format!(
                "unknown slide order {:?}, expected \"lexicographic\" or \"natural\"",
                other
            ))),
        }
    }
}

/// An image the engine wrote, paired with its final name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducedImage {
    pub temp_name: OsString,
    /// Zero-based position among the PNG files
    pub index: usize,
    pub final_name: String,
}

/// Final file name for the image at zero-based `index`.
pub fn slide_file_name(base_name: &str, index: usize) -> String {
    format!("{}_slide_{}.png", base_name, index + 1)
}

/// Sort the names and assign slide numbers to the PNG entries.
///
/// Sorting and the extension check use the lossy UTF-8 form of each name;
/// the original name is kept for the move.
pub fn plan(names: &[OsString], base_name: &str, order: SlideOrder) -> Vec<ProducedImage> {
    let mut sorted: Vec<(String, &OsString)> = names
        .iter()
        .map(|name| (name.to_string_lossy().into_owned(), name))
        .collect();
    match order {
        SlideOrder::Lexicographic => sorted.sort(),
        SlideOrder::Natural => sorted.sort_by(|a, b| {
            natural_cmp(&a.0, &b.0).then_with(|| a.1.cmp(b.1))
        }),
    }

    let mut images = Vec::new();
    for (display, name) in sorted {
        if !display.ends_with(".png") {
            debug!("Skipping non-PNG output {:?}", name);
            continue;
        }
        let index = images.len();
        images.push(ProducedImage {
            temp_name: name.clone(),
            index,
            final_name: slide_file_name(base_name, index),
        });
    }
    images
}

/// Move every PNG in `temp_dir` into `output_dir` under its slide name.
///
/// Files already moved stay where they are if a later move fails.
pub fn collate(
    temp_dir: &Path,
    output_dir: &Path,
    base_name: &str,
    order: SlideOrder,
) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(temp_dir).map_err(|e| {
        SlideError::file_handling(format!("Failed to list {:?}", temp_dir), e)
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            SlideError::file_handling(format!("Failed to read entry in {:?}", temp_dir), e)
        })?;
        names.push(entry.file_name());
    }

    let images = plan(&names, base_name, order);
    if images.is_empty() {
        warn!("LibreOffice produced no PNG files in {:?}", temp_dir);
    }

    let mut output_files = Vec::with_capacity(images.len());
    for image in images {
        let src = temp_dir.join(&image.temp_name);
        let dst = output_dir.join(&image.final_name);
        debug!("Moving {:?} -> {:?}", src, dst);
        utils::move_file(&src, &dst)?;
        output_files.push(dst);
    }

    info!("Collated {} slide images", output_files.len());
    Ok(output_files)
}

/// Compare two names treating runs of ASCII digits as numbers.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.as_bytes();
    let mut b = b.as_bytes();

    while !a.is_empty() && !b.is_empty() {
        if a[0].is_ascii_digit() && b[0].is_ascii_digit() {
            let (da, ra) = split_digits(a);
            let (db, rb) = split_digits(b);
            let ta = trim_zeros(da);
            let tb = trim_zeros(db);
            let ord = ta.len().cmp(&tb.len()).then_with(|| ta.cmp(tb));
            if ord != Ordering::Equal {
                return ord;
            }
            a = ra;
            b = rb;
        } else {
            if a[0] != b[0] {
                return a[0].cmp(&b[0]);
            }
            a = &a[1..];
            b = &b[1..];
        }
    }
    a.len().cmp(&b.len())
}

fn split_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let end = s.iter().position(|c| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn trim_zeros(digits: &[u8]) -> &[u8] {
    let start = digits
        .iter()
        .position(|&c| c != b'0')
        .unwrap_or(digits.len());
    &digits[start..]
}
