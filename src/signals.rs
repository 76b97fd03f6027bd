//! Host integration.
//!
//! The site generator owns the build; plugins subscribe to its events. This
//! module is the small event registry the plugin registers with, and
//! [`register`] is the whole integration surface.

use std::fmt;

use crate::plugin::PublicationsPlugin;
use crate::publish::RenderContext;
use crate::settings::PluginSettings;
use crate::sources::Metadata;

/// Callback invoked once per page or generator with its metadata and the
/// context to populate.
pub type ContextCallback = Box<dyn Fn(&Metadata, &mut dyn RenderContext)>;

/// One event and its subscribers.
#[derive(Default)]
pub struct Signal {
    receivers: Vec<ContextCallback>,
}

impl Signal {
    pub fn connect<F>(&mut self, callback: F)
    where
        F: Fn(&Metadata, &mut dyn RenderContext) + 'static,
    {
        self.receivers.push(Box::new(callback));
    }

    /// Calls every subscriber in connection order.
    pub fn send(&self, metadata: &Metadata, ctx: &mut dyn RenderContext) {
        for receiver in &self.receivers {
            receiver(metadata, ctx);
        }
    }

    pub fn receiver_count(&self) -> usize {
        self.receivers.len()
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("receivers", &self.receivers.len())
            .finish()
    }
}

/// Events a host exposes to plugins.
#[derive(Debug, Default)]
pub struct Signals {
    /// Fired when a page or generator context is ready to be filled.
    pub page_generator_context: Signal,
}

impl Signals {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Subscribes the publications plugin with default settings.
pub fn register(signals: &mut Signals) {
    register_with(signals, PublicationsPlugin::new(PluginSettings::default()));
}

/// Subscribes a configured plugin.
pub fn register_with(signals: &mut Signals, plugin: PublicationsPlugin) {
    signals
        .page_generator_context
        .connect(move |metadata, ctx| plugin.on_page_generator_context(metadata, ctx));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;
    use crate::sources::SourceLayout;
    use serde_json::{json, Map, Value};
    use std::sync::Arc;

    #[test]
    fn test_register_connects_one_receiver() {
        let mut signals = Signals::new();
        register(&mut signals);
        assert_eq!(signals.page_generator_context.receiver_count(), 1);
    }

    #[test]
    fn test_send_reaches_all_receivers_in_order() {
        let mut signals = Signals::new();
        signals
            .page_generator_context
            .connect(|_, ctx| ctx.set("order", json!(["first"])));
        signals
            .page_generator_context
            .connect(|_, ctx| ctx.set("second", Value::Bool(true)));

        let mut ctx = Map::new();
        signals.page_generator_context.send(&Metadata::new(), &mut ctx);

        assert_eq!(ctx["order"], json!(["first"]));
        assert_eq!(ctx["second"], json!(true));
    }

    #[test]
    fn test_registered_plugin_leaves_page_without_sources_alone() {
        // Given: the default plugin and a page naming no BibTeX files
        let mut signals = Signals::new();
        register(&mut signals);

        // When: the host fires the event
        let mut ctx = Map::new();
        signals.page_generator_context.send(&Metadata::new(), &mut ctx);

        // Then: nothing is published and nothing fails
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_register_with_reports_through_plugin_diagnostics() {
        let diag = Arc::new(RecordingDiagnostics::new());
        let settings = PluginSettings {
            layout: SourceLayout::Combined,
            ..PluginSettings::default()
        };
        let mut signals = Signals::new();
        register_with(
            &mut signals,
            PublicationsPlugin::new(settings).with_diagnostics(diag.clone()),
        );

        let mut ctx = Map::new();
        signals.page_generator_context.send(&Metadata::new(), &mut ctx);

        assert!(ctx.is_empty());
        assert_eq!(diag.errors().len(), 1);
    }
}
