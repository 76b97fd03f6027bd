//! Bucketing records and writing them into the rendering context.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::warn;

use crate::classify::Category;
use crate::record::PublicationRecord;

/// The key/value store a page template reads from.
///
/// Owned by the host; the plugin only assigns keys.
pub trait RenderContext {
    fn set(&mut self, key: &str, value: Value);
}

impl RenderContext for Map<String, Value> {
    fn set(&mut self, key: &str, value: Value) {
        self.insert(key.to_string(), value);
    }
}

impl RenderContext for BTreeMap<String, Value> {
    fn set(&mut self, key: &str, value: Value) {
        self.insert(key.to_string(), value);
    }
}

/// Ordered records per category.
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    buckets: BTreeMap<Category, Vec<PublicationRecord>>,
}

impl Buckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, keeping insertion order within the category.
    pub fn push(&mut self, category: Category, record: PublicationRecord) {
        self.buckets.entry(category).or_default().push(record);
    }

    pub fn get(&self, category: Category) -> &[PublicationRecord] {
        self.buckets.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Records across all categories.
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Writes every non-empty bucket as `<category>` and `<category>Nos`.
    ///
    /// Returns the categories written.
    pub fn publish(&self, ctx: &mut dyn RenderContext) -> Vec<Category> {
        let mut written = Vec::new();
        for category in Category::ALL {
            let records = self.get(category);
            if records.is_empty() {
                continue;
            }
            let list = match serde_json::to_value(records) {
                Ok(list) => list,
                Err(e) => {
                    warn!("cannot publish {}: {}", category, e);
                    continue;
                }
            };
            ctx.set(category.context_key(), list);
            ctx.set(&category.count_key(), Value::from(records.len()));
            written.push(category);
        }
        written
    }
}
