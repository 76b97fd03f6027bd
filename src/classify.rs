//! Entry classification.
//!
//! Every entry lands in exactly one [`Category`]. The base category comes
//! either from the file the entry was read from or from its BibTeX type;
//! conference entries are then redirected by their keywords.

use std::fmt;

use biblatex::Entry;
use serde::{Deserialize, Serialize};

use crate::bib::field_text;

/// Output bucket for a publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Journal,
    Conference,
    Invited,
    Postdeadline,
    Patent,
    BookChapter,
    Book,
}

impl Category {
    /// All categories in publishing order.
    pub const ALL: [Category; 7] = [
        Category::Journal,
        Category::Conference,
        Category::Invited,
        Category::Postdeadline,
        Category::Patent,
        Category::BookChapter,
        Category::Book,
    ];

    /// Context key the bucket is published under.
    pub fn context_key(self) -> &'static str {
        match self {
            Category::Journal => "journal",
            Category::Conference => "conference",
            Category::Invited => "invited",
            Category::Postdeadline => "postdeadline",
            Category::Patent => "patent",
            Category::BookChapter => "book_chapter",
            Category::Book => "book",
        }
    }

    /// Context key the bucket length is published under.
    pub fn count_key(self) -> String {
        format!("{}Nos", self.context_key())
    }

    /// Page metadata key naming this category's BibTeX file.
    ///
    /// Postdeadline papers have no file of their own; they are split out of
    /// the conference file.
    pub fn source_key(self) -> Option<&'static str> {
        self.source_keys().first().copied()
    }

    /// Every metadata key accepted for this category's file, preferred first.
    ///
    /// `patent_src` and `book_chapter_src` follow the `<category>_src`
    /// pattern and are read when the preferred key is absent.
    pub fn source_keys(self) -> &'static [&'static str] {
        match self {
            Category::Journal => &["journal_src"],
            Category::Conference => &["conference_src"],
            Category::Invited => &["invited_src"],
            Category::Postdeadline => &[],
            Category::Patent => &["patents_src", "patent_src"],
            Category::BookChapter => &["bookchapter_src", "book_chapter_src"],
            Category::Book => &["book_src"],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.context_key())
    }
}

/// Coarse entry type, as far as classification and formatting care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Article,
    Conference,
    Patent,
    BookChapter,
    Book,
    Other(String),
}

impl EntryKind {
    /// Maps a BibTeX type name (case-insensitive) to a kind.
    pub fn from_type_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "article" => EntryKind::Article,
            "inproceedings" | "conference" => EntryKind::Conference,
            "patent" => EntryKind::Patent,
            "incollection" | "inbook" => EntryKind::BookChapter,
            "book" => EntryKind::Book,
            other => EntryKind::Other(other.to_string()),
        }
    }

    pub fn of(entry: &Entry) -> Self {
        Self::from_type_name(&entry.entry_type.to_string())
    }

    /// Category an entry of this kind falls into when no file says otherwise.
    ///
    /// Unrecognized types are listed with journal papers.
    pub fn default_category(&self) -> Category {
        match self {
            EntryKind::Article => Category::Journal,
            EntryKind::Conference => Category::Conference,
            EntryKind::Patent => Category::Patent,
            EntryKind::BookChapter => Category::BookChapter,
            EntryKind::Book => Category::Book,
            EntryKind::Other(_) => Category::Journal,
        }
    }
}

/// Lowercased keyword tokens of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords(Vec<String>);

impl Keywords {
    /// Splits a keywords field into words.
    ///
    /// Anything other than a letter or digit separates words, so tags such
    /// as `invited-talk` or `postdeadline_paper` carry their keyword.
    pub fn parse(raw: &str) -> Self {
        Keywords(
            raw.split(|c: char| !c.is_alphanumeric())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_lowercase())
                .collect(),
        )
    }

    /// A missing `keywords` field yields no keywords.
    pub fn from_entry(entry: &Entry) -> Self {
        field_text(entry, "keywords")
            .map(|raw| Self::parse(&raw))
            .unwrap_or_default()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.0.iter().any(|k| k.eq_ignore_ascii_case(keyword))
    }
}

/// Picks the bucket for `entry`.
///
/// `source` is the category of the file the entry came from, if the site
/// keeps one file per category. Without it the entry type decides.
pub fn classify(entry: &Entry, source: Option<Category>) -> Category {
    let base = source.unwrap_or_else(|| EntryKind::of(entry).default_category());
    refine(base, &Keywords::from_entry(entry))
}

/// Applies keyword precedence to a base category.
pub fn refine(base: Category, keywords: &Keywords) -> Category {
    if base != Category::Conference {
        return base;
    }
    if keywords.contains("postdeadline") {
        Category::Postdeadline
    } else if keywords.contains("invited") {
        Category::Invited
    } else {
        Category::Conference
    }
}
