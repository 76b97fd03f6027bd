//! The population pass: sources in, context keys out.

use std::path::PathBuf;
use std::sync::Arc;

use crate::bib::load_bibliography;
use crate::classify::{classify, Category};
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::publish::{Buckets, RenderContext};
use crate::record::PublicationRecord;
use crate::settings::PluginSettings;
use crate::sources::{locate_sources, ConfigError, Metadata, Source};

/// What one pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulateReport {
    /// Files read and parsed.
    pub loaded: Vec<PathBuf>,
    /// Files skipped after a read or parse failure.
    pub failed: Vec<PathBuf>,
    /// Entries bucketed across all loaded files.
    pub entries: usize,
    /// Categories written into the context.
    pub published: Vec<Category>,
}

/// Reads BibTeX files named in page metadata and publishes formatted,
/// categorized publication lists.
#[derive(Clone)]
pub struct PublicationsPlugin {
    settings: PluginSettings,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for PublicationsPlugin {
    fn default() -> Self {
        Self::new(PluginSettings::default())
    }
}

impl PublicationsPlugin {
    /// Creates a plugin reporting through `tracing`.
    pub fn new(settings: PluginSettings) -> Self {
        PublicationsPlugin {
            settings,
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Replaces the diagnostics sink.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// Reads, formats and buckets every source named in `metadata`.
    ///
    /// A source that cannot be read or parsed is reported and skipped; the
    /// others are still processed.
    ///
    /// # Errors
    ///
    /// Only configuration errors (a missing required key) are returned.
    pub fn collect(&self, metadata: &Metadata) -> Result<(Buckets, PopulateReport), ConfigError> {
        let sources = locate_sources(
            metadata,
            self.settings.layout,
            self.settings.base_dir.as_deref(),
        )?;

        let mut buckets = Buckets::new();
        let mut report = PopulateReport::default();
        for source in &sources {
            match self.collect_source(source, &mut buckets) {
                Some(count) => {
                    tracing::debug!(path = %source.path.display(), entries = count, "loaded bibliography");
                    report.loaded.push(source.path.clone());
                    report.entries += count;
                }
                None => report.failed.push(source.path.clone()),
            }
        }
        Ok((buckets, report))
    }

    /// Runs a full pass and writes the buckets into `ctx`.
    ///
    /// On error the context is left untouched.
    pub fn populate(
        &self,
        metadata: &Metadata,
        ctx: &mut dyn RenderContext,
    ) -> Result<PopulateReport, ConfigError> {
        let (buckets, mut report) = self.collect(metadata)?;
        report.published = buckets.publish(ctx);
        Ok(report)
    }

    /// Host callback for the page/generator context event.
    ///
    /// Never fails: configuration errors are reported and the context is
    /// left as it was.
    pub fn on_page_generator_context(&self, metadata: &Metadata, ctx: &mut dyn RenderContext) {
        if let Err(e) = self.populate(metadata, ctx) {
            self.diagnostics.error(&format!("publications not populated: {}", e));
        }
    }

    /// Buckets one file; `None` if it could not be loaded.
    fn collect_source(&self, source: &Source, buckets: &mut Buckets) -> Option<usize> {
        let bibliography = match load_bibliography(&source.path) {
            Ok(b) => b,
            Err(e) => {
                self.diagnostics.warn(&format!(
                    "failed to parse file {}: {}",
                    source.path.display(),
                    e
                ));
                return None;
            }
        };

        let style = self.settings.style;
        let mut entries: Vec<_> = bibliography.iter().collect();
        if style.sorts() {
            entries.sort_by_cached_key(|e| style.sort_key(e));
        }

        for entry in &entries {
            let category = classify(entry, source.category);
            buckets.push(category, PublicationRecord::from_entry(entry, style));
        }
        Some(entries.len())
    }
}
