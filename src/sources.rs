//! Finding the BibTeX files a page asks for.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::Category;

/// Page or site metadata: setting name to value.
pub type Metadata = BTreeMap<String, String>;

/// Metadata key naming the single file of the combined layout.
pub const COMBINED_SOURCE_KEY: &str = "publications_src";

/// How a page names its BibTeX files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceLayout {
    /// One file per category (`journal_src`, `conference_src`, ...).
    #[default]
    PerCategory,
    /// A single `publications_src` file; entry types decide the category.
    Combined,
}

/// Configuration problems that stop a population pass.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required metadata key '{key}' (path to the BibTeX file with all publications)")]
    MissingSource { key: String },
}

/// A file to read and the category its entries start in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    /// `None` for the combined layout, where entry types decide.
    pub category: Option<Category>,
}

/// Resolves the files named in `metadata`.
///
/// # Arguments
///
/// * `metadata` - Page metadata
/// * `layout` - Which keys to look for
/// * `base_dir` - Directory relative paths are resolved against, if any
///
/// # Errors
///
/// The combined layout requires `publications_src`; per-category keys are
/// all optional and simply skipped when absent.
pub fn locate_sources(
    metadata: &Metadata,
    layout: SourceLayout,
    base_dir: Option<&Path>,
) -> Result<Vec<Source>, ConfigError> {
    match layout {
        SourceLayout::PerCategory => Ok(Category::ALL
            .iter()
            .filter_map(|&category| {
                let value = category
                    .source_keys()
                    .iter()
                    .find_map(|key| lookup(metadata, key))?;
                Some(Source {
                    path: resolve(value, base_dir),
                    category: Some(category),
                })
            })
            .collect()),
        SourceLayout::Combined => {
            let value = lookup(metadata, COMBINED_SOURCE_KEY).ok_or_else(|| {
                ConfigError::MissingSource {
                    key: COMBINED_SOURCE_KEY.to_string(),
                }
            })?;
            Ok(vec![Source {
                path: resolve(value, base_dir),
                category: None,
            }])
        }
    }
}

/// Blank values count as absent.
fn lookup<'a>(metadata: &'a Metadata, key: &str) -> Option<&'a str> {
    metadata
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn resolve(value: &str, base_dir: Option<&Path>) -> PathBuf {
    let path = PathBuf::from(value);
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path,
    }
}
