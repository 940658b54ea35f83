//! Tolerant markup querying.
//!
//! The page extractor only needs a handful of queries: first element text,
//! first attribute of an element selected by exact attribute value, element
//! counts and a root attribute. [`MarkupQuery`] names exactly those, and
//! [`ScraperDocument`] answers them with `scraper` (html5ever), which never
//! rejects input.

use scraper::{ElementRef, Html, Selector};

/// Select elements whose attribute named by one of `keys` equals `value`.
///
/// Matching is exact on the trimmed attribute value, ignoring ASCII case.
/// `og:image` does not match `og:image:width`.
#[derive(Debug, Clone, Copy)]
pub struct AttrMatch<'a> {
    pub keys: &'a [&'static str],
    pub value: &'a str,
}

impl<'a> AttrMatch<'a> {
    pub fn new(keys: &'a [&'static str], value: &'a str) -> Self {
        Self { keys, value }
    }

    fn matches(&self, el: &ElementRef<'_>) -> bool {
        self.keys.iter().any(|key| {
            el.value()
                .attr(key)
                .is_some_and(|v| v.trim().eq_ignore_ascii_case(self.value))
        })
    }
}

/// Queries the page extractor runs against a parsed document.
///
/// Tag and attribute names are case-insensitive.
pub trait MarkupQuery {
    /// Trimmed text content of the first `tag` element.
    fn first_text(&self, tag: &str) -> Option<String>;

    /// On the first `tag` element selected by `filter`, the first non-empty
    /// value among `attrs`, trimmed.
    fn first_attr(&self, tag: &str, filter: AttrMatch<'_>, attrs: &[&str]) -> Option<String>;

    /// Number of `tag` elements, optionally restricted by `filter`.
    fn count(&self, tag: &str, filter: Option<AttrMatch<'_>>) -> usize;

    /// Attribute of the root `html` element, trimmed.
    fn root_attr(&self, attr: &str) -> Option<String>;

    /// Whether any `tag` element has an `attr` containing `needle`
    /// (ASCII case-insensitive).
    fn any_attr_contains(&self, tag: &str, attr: &str, needle: &str) -> bool;

    /// The unparsed source text.
    fn source(&self) -> &str;
}

/// [`MarkupQuery`] backed by `scraper`.
pub struct ScraperDocument<'s> {
    html: Html,
    source: &'s str,
}

impl<'s> ScraperDocument<'s> {
    /// Parse `source`, or `None` if there is nothing to parse.
    ///
    /// Parse errors are ignored; html5ever recovers from any input.
    pub fn parse(source: &'s str) -> Option<Self> {
        if source.trim().is_empty() {
            return None;
        }
        Some(Self {
            html: Html::parse_document(source),
            source,
        })
    }

    fn elements(&self, tag: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(&tag.to_ascii_lowercase()) {
            Ok(sel) => self.html.select(&sel).collect(),
            Err(_) => Vec::new(),
        }
    }
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl MarkupQuery for ScraperDocument<'_> {
    fn first_text(&self, tag: &str) -> Option<String> {
        self.elements(tag)
            .first()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    fn first_attr(&self, tag: &str, filter: AttrMatch<'_>, attrs: &[&str]) -> Option<String> {
        let el = self.elements(tag).into_iter().find(|el| filter.matches(el))?;
        attrs
            .iter()
            .find_map(|attr| el.value().attr(attr).and_then(trimmed))
    }

    fn count(&self, tag: &str, filter: Option<AttrMatch<'_>>) -> usize {
        self.elements(tag)
            .iter()
            .filter(|el| filter.map_or(true, |f| f.matches(el)))
            .count()
    }

    fn root_attr(&self, attr: &str) -> Option<String> {
        self.html.root_element().value().attr(attr).and_then(trimmed)
    }

    fn any_attr_contains(&self, tag: &str, attr: &str, needle: &str) -> bool {
        let needle = needle.to_ascii_lowercase();
        self.elements(tag).iter().any(|el| {
            el.value()
                .attr(attr)
                .is_some_and(|v| v.to_ascii_lowercase().contains(&needle))
        })
    }

    fn source(&self) -> &str {
        self.source
    }
}
