//! Citation styles.
//!
//! A style is a choice of [`Template`] per entry kind plus an ordering rule.
//! Rendering produces an HTML fragment: italics for containers, bold volume
//! numbers in the nature style, and links for web references.

use std::fmt;

use biblatex::{Entry, Person};
use serde::{Deserialize, Serialize};

use crate::bib::field_text;
use crate::classify::EntryKind;
use crate::latex;

/// A named citation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationStyle {
    /// Unsrt layout, sorted by author, year and title.
    Plain,
    /// Entries in file order.
    Unsrt,
    /// Unsrt with journal-style articles and patents, and no bare URLs.
    #[default]
    Nature,
}

/// Layout used for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Article,
    NatureArticle,
    InProceedings,
    Book,
    BookChapter,
    Patent,
    NaturePatent,
    Misc,
}

/// Single source of truth for builtin styles.
const BUILTIN_STYLES: &[(&str, CitationStyle)] = &[
    ("nature", CitationStyle::Nature),
    ("plain", CitationStyle::Plain),
    ("unsrt", CitationStyle::Unsrt),
];

/// Returns a built-in style by name.
///
/// # Arguments
///
/// * `name` - The name of the built-in style (e.g., "nature")
///
/// # Returns
///
/// The style if it exists, or None.
pub fn builtin_style(name: &str) -> Option<CitationStyle> {
    BUILTIN_STYLES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, style)| *style)
}

/// Returns the list of available builtin style names.
pub fn builtin_style_names() -> Vec<&'static str> {
    BUILTIN_STYLES.iter().map(|(n, _)| *n).collect()
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = BUILTIN_STYLES
            .iter()
            .find(|(_, s)| s == self)
            .map_or("unknown", |(n, _)| *n);
        f.write_str(name)
    }
}

impl CitationStyle {
    /// Picks the layout for an entry kind.
    pub fn template_for(&self, kind: &EntryKind) -> Template {
        match (self, kind) {
            (CitationStyle::Nature, EntryKind::Article) => Template::NatureArticle,
            (CitationStyle::Nature, EntryKind::Patent) => Template::NaturePatent,
            (_, EntryKind::Article) => Template::Article,
            (_, EntryKind::Patent) => Template::Patent,
            (_, EntryKind::Conference) => Template::InProceedings,
            (_, EntryKind::Book) => Template::Book,
            (_, EntryKind::BookChapter) => Template::BookChapter,
            (_, EntryKind::Other(_)) => Template::Misc,
        }
    }

    /// Whether entries are reordered before formatting.
    pub fn sorts(&self) -> bool {
        matches!(self, CitationStyle::Plain)
    }

    /// Ordering key used when [`sorts`](Self::sorts) is true.
    pub fn sort_key(&self, entry: &Entry) -> (String, String, String) {
        let author = entry
            .author()
            .ok()
            .and_then(|people| people.into_iter().next())
            .map(|p| p.name.to_lowercase())
            .unwrap_or_default();
        let year = field_text(entry, "year").unwrap_or_default();
        let title = field_text(entry, "title")
            .map(|t| latex::clean(&t).to_lowercase())
            .unwrap_or_default();
        (author, year, title)
    }

    /// Renders one entry as an HTML fragment.
    pub fn format_entry(&self, entry: &Entry) -> String {
        let template = self.template_for(&EntryKind::of(entry));
        let f = Fields(entry);

        let mut blocks: Vec<Option<String>> = vec![sentence(&[f.authors()])];
        match template {
            Template::Article => {
                blocks.push(sentence(&[f.text("title")]));
                blocks.push(sentence(&[
                    f.emph("journal"),
                    volume_number_pages(&f),
                    f.date(),
                ]));
            }
            Template::NatureArticle => {
                blocks.push(sentence(&[f.text("title")]));
                let journal = [
                    f.emph("journal"),
                    f.text("volume").map(|v| format!("<strong>{}</strong>", v)),
                ]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
                let mut line = join_present(&[non_empty(journal), f.text("pages")], ", ");
                if let Some(year) = f.text("year") {
                    line = Some(match line {
                        Some(l) => format!("{} ({})", l, year),
                        None => format!("({})", year),
                    });
                }
                blocks.push(sentence(&[line]));
            }
            Template::InProceedings => {
                blocks.push(sentence(&[f.text("title")]));
                blocks.push(sentence(&[
                    f.emph("booktitle").map(|b| format!("In {}", b)),
                    f.text("volume").map(|v| format!("volume {}", v)),
                    f.text("pages").map(|p| pages_label(&p)),
                    f.text("organization"),
                    f.text("publisher"),
                    f.date(),
                ]));
            }
            Template::Book => {
                blocks.push(sentence(&[f.emph("title")]));
                blocks.push(sentence(&[
                    f.text("publisher"),
                    f.text("address"),
                    f.text("edition").map(|e| format!("{} edition", e)),
                    f.date(),
                ]));
            }
            Template::BookChapter => {
                blocks.push(sentence(&[f.text("title")]));
                blocks.push(sentence(&[
                    f.emph("booktitle").map(|b| format!("In {}", b)),
                    f.text("chapter").map(|c| format!("chapter {}", c)),
                    f.text("pages").map(|p| pages_label(&p)),
                ]));
                blocks.push(sentence(&[f.text("publisher"), f.text("address"), f.date()]));
            }
            Template::Patent => {
                blocks.push(sentence(&[f.text("title")]));
                blocks.push(sentence(&[f.text("number"), f.date()]));
            }
            Template::NaturePatent => {
                blocks.push(sentence(&[f.text("title")]));
                let line = match (f.emph("number"), f.text("year")) {
                    (Some(n), Some(y)) => Some(format!("{} ({})", n, y)),
                    (Some(n), None) => Some(n),
                    (None, Some(y)) => Some(format!("({})", y)),
                    (None, None) => None,
                };
                blocks.push(sentence(&[line]));
            }
            Template::Misc => {
                blocks.push(sentence(&[f.text("title")]));
                blocks.push(sentence(&[f.text("howpublished"), f.date()]));
            }
        }
        if template != Template::NaturePatent {
            blocks.push(sentence(&[f.text("note")]));
            blocks.push(self.web_refs(&f));
        }

        blocks.into_iter().flatten().collect::<Vec<_>>().join("\n")
    }

    /// Links to the online versions of an entry.
    ///
    /// The nature style leaves out the plain URL; it is offered separately
    /// as the record's link.
    fn web_refs(&self, f: &Fields<'_>) -> Option<String> {
        let url = match self {
            CitationStyle::Nature => None,
            _ => f
                .raw("url")
                .map(|u| format!("URL: <a href=\"{0}\">{0}</a>", escape_html(&u))),
        };
        let eprint = f.raw("eprint").map(|e| {
            let e = escape_html(&e);
            format!("arXiv:<a href=\"https://arxiv.org/abs/{0}\">{0}</a>", e)
        });
        let pubmed = f.raw("pubmed").map(|p| {
            let p = escape_html(&p);
            format!("PMID:<a href=\"https://www.ncbi.nlm.nih.gov/pubmed/{0}\">{0}</a>", p)
        });
        let doi = f.raw("doi").map(|d| {
            let d = escape_html(&d);
            format!("doi:<a href=\"https://doi.org/{0}\">{0}</a>", d)
        });
        sentence(&[url, eprint, pubmed, doi])
    }
}

/// Field access with LaTeX clean-up and HTML escaping applied.
struct Fields<'a>(&'a Entry);

impl Fields<'_> {
    /// Display text of a field.
    fn text(&self, name: &str) -> Option<String> {
        field_text(self.0, name).map(|s| escape_html(&latex::clean(&s)))
    }

    fn emph(&self, name: &str) -> Option<String> {
        self.text(name).map(|s| format!("<em>{}</em>", s))
    }

    /// Field value without LaTeX decoding, for identifiers and links.
    fn raw(&self, name: &str) -> Option<String> {
        field_text(self.0, name)
    }

    fn date(&self) -> Option<String> {
        match (self.text("month"), self.text("year")) {
            (Some(m), Some(y)) => Some(format!("{} {}", m, y)),
            (None, Some(y)) => Some(y),
            _ => None,
        }
    }

    /// Author list: `A`, `A and B`, `A, B, and C`.
    fn authors(&self) -> Option<String> {
        let names: Vec<String> = match self.0.author() {
            Ok(people) => people
                .iter()
                .map(format_person)
                .filter(|n| !n.is_empty())
                .map(|n| escape_html(&latex::clean(&n)))
                .collect(),
            Err(_) => self.text("author").into_iter().collect(),
        };
        match names.len() {
            0 => None,
            1 => Some(names[0].clone()),
            2 => Some(format!("{} and {}", names[0], names[1])),
            n => Some(format!("{}, and {}", names[..n - 1].join(", "), names[n - 1])),
        }
    }
}

/// Formats a person as "Given prefix Family suffix".
fn format_person(p: &Person) -> String {
    [&p.given_name, &p.prefix, &p.name, &p.suffix]
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `12(3):1–10` from volume, number and pages.
fn volume_number_pages(f: &Fields<'_>) -> Option<String> {
    let mut out = f.text("volume").unwrap_or_default();
    if let Some(number) = f.text("number") {
        out.push_str(&format!("({})", number));
    }
    if let Some(pages) = f.text("pages") {
        if out.is_empty() {
            return Some(pages_label(&pages));
        }
        out.push(':');
        out.push_str(&pages);
    }
    non_empty(out)
}

fn pages_label(pages: &str) -> String {
    if pages.contains(['-', '\u{2013}', ',']) {
        format!("pages {}", pages)
    } else {
        format!("page {}", pages)
    }
}

fn join_present(parts: &[Option<String>], sep: &str) -> Option<String> {
    let present: Vec<&str> = parts.iter().flatten().map(|s| s.as_str()).collect();
    non_empty(present.join(sep))
}

/// Joins the present parts with commas and closes with a period.
fn sentence(parts: &[Option<String>]) -> Option<String> {
    let mut s = join_present(parts, ", ")?;
    if !s.ends_with(['.', '?', '!']) {
        s.push('.');
    }
    Some(s)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Escapes the characters that are significant in HTML text.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bib::parse_bibliography;

    fn render(style: CitationStyle, source: &str) -> String {
        let bib = parse_bibliography(source).unwrap();
        style.format_entry(bib.iter().next().expect("one entry"))
    }

    const ARTICLE: &str = r#"
@article{doe2020,
    author = {Doe, John and Roe, Jane and Moe, Max},
    title = {Fibre Lasers},
    journal = {Optics Letters},
    volume = {12},
    number = {3},
    pages = {1--10},
    year = {2020},
    doi = {10.1000/xyz},
    url = {https://example.org/doe2020}
}
"#;

    // ============================================
    // Tests for builtin_style()
    // ============================================

    #[test]
    fn test_builtin_style_unknown_returns_none() {
        assert!(builtin_style("unknown-style-that-does-not-exist").is_none());
    }

    #[test]
    fn test_builtin_style_names_all_resolve() {
        for name in builtin_style_names() {
            assert!(
                builtin_style(name).is_some(),
                "builtin_style_names() lists '{}' but builtin_style('{}') returns None",
                name,
                name
            );
        }
    }

    #[test]
    fn test_builtin_style_display_roundtrips_name() {
        for name in builtin_style_names() {
            assert_eq!(builtin_style(name).unwrap().to_string(), name);
        }
    }

    // ============================================
    // Template selection
    // ============================================

    #[test]
    fn test_template_for_nature_overrides() {
        let nature = CitationStyle::Nature;
        assert_eq!(nature.template_for(&EntryKind::Article), Template::NatureArticle);
        assert_eq!(nature.template_for(&EntryKind::Patent), Template::NaturePatent);
        assert_eq!(nature.template_for(&EntryKind::Book), Template::Book);
    }

    #[test]
    fn test_template_for_stock_styles() {
        for style in [CitationStyle::Plain, CitationStyle::Unsrt] {
            assert_eq!(style.template_for(&EntryKind::Article), Template::Article);
            assert_eq!(style.template_for(&EntryKind::Conference), Template::InProceedings);
            assert_eq!(
                style.template_for(&EntryKind::Other("misc".into())),
                Template::Misc
            );
        }
    }

    // ============================================
    // Rendering
    // ============================================

    #[test]
    fn test_nature_article() {
        // Given: a journal article with a DOI and a URL
        // When: we render it in the nature style
        let html = render(CitationStyle::Nature, ARTICLE);

        // Then: journal is italic, volume bold, year in parentheses
        assert!(html.contains("John Doe, Jane Roe, and Max Moe."), "got:\n{}", html);
        assert!(html.contains("Fibre Lasers."), "got:\n{}", html);
        assert!(
            html.contains("<em>Optics Letters</em> <strong>12</strong>, 1\u{2013}10 (2020)."),
            "got:\n{}",
            html
        );
        // And: the DOI is linked but the bare URL is not shown
        assert!(html.contains("doi:<a href=\"https://doi.org/10.1000/xyz\">10.1000/xyz</a>"));
        assert!(!html.contains("example.org"), "got:\n{}", html);
    }

    #[test]
    fn test_unsrt_article_shows_url() {
        let html = render(CitationStyle::Unsrt, ARTICLE);
        assert!(
            html.contains("<em>Optics Letters</em>, 12(3):1\u{2013}10, 2020."),
            "got:\n{}",
            html
        );
        assert!(html.contains("URL: <a href=\"https://example.org/doe2020\">"));
    }

    #[test]
    fn test_nature_patent() {
        let src = r#"@patent{p1, author = {Doe, John}, title = {Laser Thing},
            number = {US 1234567}, year = {2019}}"#;
        let html = render(CitationStyle::Nature, src);
        assert_eq!(html, "John Doe.\nLaser Thing.\n<em>US 1234567</em> (2019).");
    }

    #[test]
    fn test_inproceedings() {
        let src = r#"@inproceedings{c1, author = {Roe, Jane and Doe, John},
            title = {Talk}, booktitle = {Proc. CLEO}, pages = {5}, year = {2018}}"#;
        let html = render(CitationStyle::Nature, src);
        assert!(html.starts_with("Jane Roe and John Doe.\nTalk.\n"), "got:\n{}", html);
        assert!(html.contains("In <em>Proc. CLEO</em>, page 5, 2018."), "got:\n{}", html);
    }

    #[test]
    fn test_accents_decoded_and_braces_stripped() {
        // Given: a title with LaTeX accents and protective braces
        let src = r#"@article{a, author = {M{\"u}ller, J{\"o}rg}, title = {{\'E}tude of {DNA}},
            journal = {J}, year = {2001}}"#;

        // When: we render it
        let html = render(CitationStyle::Nature, src);

        // Then: the text carries Unicode and no braces
        assert!(html.contains("Müller"), "got:\n{}", html);
        assert!(html.contains("Étude of DNA"), "got:\n{}", html);
        assert!(!html.contains('{') && !html.contains('}'), "got:\n{}", html);
    }

    #[test]
    fn test_html_special_characters_escaped() {
        let src = r#"@misc{m, title = {Less <than> more}, year = {2000}}"#;
        let html = render(CitationStyle::Unsrt, src);
        assert!(html.contains("Less &lt;than&gt; more."), "got:\n{}", html);
    }

    #[test]
    fn test_sort_key_orders_by_author_then_year() {
        let bib = parse_bibliography(
            r#"@article{b, author = {Zed, Z}, year = {2000}, title = {B}}
               @article{a, author = {Abe, A}, year = {2010}, title = {A}}"#,
        )
        .unwrap();
        let style = CitationStyle::Plain;
        let mut entries: Vec<_> = bib.iter().collect();
        entries.sort_by_cached_key(|e| style.sort_key(e));
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert!(style.sorts());
        assert!(!CitationStyle::Unsrt.sorts());
    }
}
