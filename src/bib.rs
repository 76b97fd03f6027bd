//! BibTeX file loading.
//!
//! Reads a bibliography file to completion and hands the text to the
//! `biblatex` parser. Nothing here interprets entries; that is left to the
//! classifier and the formatter.

use std::fs;
use std::path::Path;

use biblatex::{Bibliography, ChunksExt, Entry};
use thiserror::Error;

/// Errors that can occur when loading a bibliography.
#[derive(Error, Debug)]
pub enum BibError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid BibTeX: {0}")]
    ParseError(String),
}

/// Loads and parses a BibTeX file.
///
/// # Arguments
///
/// * `path` - Path to the `.bib` file
///
/// # Returns
///
/// The parsed bibliography, entries in file order.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid BibTeX.
pub fn load_bibliography(path: &Path) -> Result<Bibliography, BibError> {
    let content = fs::read_to_string(path)?;
    parse_bibliography(&content)
}

/// Parses BibTeX source held in memory.
pub fn parse_bibliography(content: &str) -> Result<Bibliography, BibError> {
    Bibliography::parse(content).map_err(|e| BibError::ParseError(e.to_string()))
}

/// Returns a field as plain text, or `None` when absent or blank.
///
/// Brace-protected and math chunks are flattened, so `{DNA} $x$` reads as
/// `DNA x`.
pub fn field_text(entry: &Entry, name: &str) -> Option<String> {
    entry
        .get(name)
        .map(|chunks| chunks.format_verbatim())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
