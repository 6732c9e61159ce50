use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::csv::CSV_EXTENSION;
use crate::domain::error::Result;

static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid filename regex"));

pub fn ensure_output_dir(dir: &Path) -> Result<PathBuf> {
    ensure_dir(dir)?;
    Ok(dir.to_path_buf())
}

/// Build `<stem>-<timestamp>.csv` from a caller-supplied stem.
///
/// The stem is sanitized to a portable character set; an empty or
/// fully-sanitized-away stem falls back to "export".
pub fn timestamped_filename(stem: &str) -> String {
    let stamp = Local::now().format("%Y-%m-%d-%H%M%S");
    format!("{}-{}.{}", sanitize_stem(stem), stamp, CSV_EXTENSION)
}

pub fn sanitize_stem(stem: &str) -> String {
    let cleaned = UNSAFE_FILENAME_CHARS
        .replace_all(stem.trim(), "_")
        .trim_matches('_')
        .to_string();

    if cleaned.is_empty() {
        "export".to_string()
    } else {
        cleaned
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
