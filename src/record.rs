//! Output records handed to templates.

use biblatex::Entry;
use serde::ser::{Serialize, SerializeTuple, Serializer};

use crate::bib::field_text;
use crate::bibtex::to_bibtex;
use crate::style::CitationStyle;

/// One publication as templates see it.
///
/// Serializes as the 7-element array
/// `[key, year, text, bibtex, link, slides, poster]` so templates can unpack
/// it positionally.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicationRecord {
    /// The citation key
    pub key: String,
    pub year: Option<String>,
    /// Rendered HTML citation
    pub text: String,
    /// The entry re-serialized as BibTeX
    pub bibtex: String,
    /// `url` when present, otherwise `pdf`
    pub link: Option<String>,
    pub slides: Option<String>,
    pub poster: Option<String>,
}

impl PublicationRecord {
    /// Builds the record for `entry` in the given style.
    pub fn from_entry(entry: &Entry, style: CitationStyle) -> Self {
        let link = field_text(entry, "url").or_else(|| field_text(entry, "pdf"));
        PublicationRecord {
            key: entry.key.clone(),
            year: field_text(entry, "year"),
            text: style.format_entry(entry),
            bibtex: to_bibtex(entry),
            link,
            slides: field_text(entry, "slides"),
            poster: field_text(entry, "poster"),
        }
    }
}

impl Serialize for PublicationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(7)?;
        tuple.serialize_element(&self.key)?;
        tuple.serialize_element(&self.year)?;
        tuple.serialize_element(&self.text)?;
        tuple.serialize_element(&self.bibtex)?;
        tuple.serialize_element(&self.link)?;
        tuple.serialize_element(&self.slides)?;
        tuple.serialize_element(&self.poster)?;
        tuple.end()
    }
}
