//! Re-serialization of single entries to BibTeX.
//!
//! Templates show the BibTeX source next to each publication. The block
//! written here re-parses to the same key and field values: escaped
//! characters are escaped again, brace-protected chunks keep their braces and
//! math keeps its dollars.

use biblatex::Entry;
use tracing::debug;

/// Writes `entry` as a standalone BibTeX block.
///
/// Entry types BibTeX has no name for are written in BibLaTeX form instead.
/// The block always ends with a newline.
pub fn to_bibtex(entry: &Entry) -> String {
    let mut text = entry.to_bibtex_string().unwrap_or_else(|e| {
        debug!(key = %entry.key, "writing BibLaTeX form: {:?}", e);
        entry.to_biblatex_string()
    });
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
