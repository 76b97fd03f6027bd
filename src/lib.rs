//! bibtex-publications: publication lists for static sites, from BibTeX.
//!
//! This library provides functionality to:
//! - Locate the BibTeX files a page names in its metadata
//! - Parse them with `biblatex`
//! - Render each entry as HTML in a citation style, and back to BibTeX
//! - Sort entries into journal, conference, invited, postdeadline, patent,
//!   book chapter and book lists
//! - Publish those lists into a template rendering context

pub mod bib;
pub mod bibtex;
pub mod classify;
pub mod diagnostics;
pub mod latex;
pub mod plugin;
pub mod publish;
pub mod record;
pub mod settings;
pub mod signals;
pub mod sources;
pub mod style;

pub use bib::{load_bibliography, parse_bibliography, BibError};
pub use bibtex::to_bibtex;
pub use classify::{classify, Category, EntryKind, Keywords};
pub use diagnostics::{Diagnostics, RecordingDiagnostics, TracingDiagnostics};
pub use plugin::{PopulateReport, PublicationsPlugin};
pub use publish::{Buckets, RenderContext};
pub use record::PublicationRecord;
pub use settings::{load_settings, PluginSettings, SettingsError};
pub use signals::{register, register_with, Signals};
pub use sources::{locate_sources, ConfigError, Metadata, Source, SourceLayout};
pub use style::{builtin_style, builtin_style_names, CitationStyle, Template};
