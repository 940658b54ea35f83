//! On-page SEO signals extracted from the home page markup.

use super::markup::{AttrMatch, MarkupQuery, ScraperDocument};

/// Open Graph keys, each looked up by exact `property` or `name`.
pub const OPEN_GRAPH_KEYS: [&str; 4] = ["og:title", "og:description", "og:image", "og:url"];

const NAME: &[&str] = &["name"];
const PROPERTY_OR_NAME: &[&str] = &["property", "name"];
const REL: &[&str] = &["rel"];
const TYPE: &[&str] = &["type"];

/// The four Open Graph values, in [`OPEN_GRAPH_KEYS`] order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenGraph {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
}

impl OpenGraph {
    fn fields(&self) -> [(&'static str, &Option<String>); 4] {
        [
            (OPEN_GRAPH_KEYS[0], &self.title),
            (OPEN_GRAPH_KEYS[1], &self.description),
            (OPEN_GRAPH_KEYS[2], &self.image),
            (OPEN_GRAPH_KEYS[3], &self.url),
        ]
    }

    pub fn is_complete(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_some())
    }

    /// Keys with no value.
    pub fn missing(&self) -> Vec<&'static str> {
        self.fields()
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| *k)
            .collect()
    }
}

/// Ten signals read from one HTML document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OnPageSignals {
    /// Trimmed text of the first `<title>`; `None` if missing or empty.
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical: Option<String>,
    /// Raw `content` of the viewport meta, whether or not it names a width.
    pub viewport: Option<String>,
    pub h1_count: usize,
    pub open_graph: OpenGraph,
    pub twitter_card: Option<String>,
    pub structured_data_count: usize,
    pub lang: Option<String>,
    pub favicon: bool,
}

impl OnPageSignals {
    /// A viewport counts only when its content mentions a width.
    pub fn has_viewport_width(&self) -> bool {
        self.viewport
            .as_deref()
            .is_some_and(|v| v.to_ascii_lowercase().contains("width"))
    }
}

/// Result of running the extractor over the home page body.
#[derive(Debug, Clone, PartialEq)]
pub enum PageSignals {
    Extracted(OnPageSignals),
    /// No body, or nothing parsable in it.
    Unavailable,
}

/// Parse `html` and extract every signal, or report it unavailable.
pub fn extract(html: Option<&str>) -> PageSignals {
    match html.and_then(ScraperDocument::parse) {
        Some(doc) => PageSignals::Extracted(extract_from(&doc)),
        None => PageSignals::Unavailable,
    }
}

/// Extract signals from any [`MarkupQuery`] implementation.
pub fn extract_from<M: MarkupQuery>(doc: &M) -> OnPageSignals {
    let meta = |keys: &'static [&'static str], value: &str| {
        doc.first_attr("meta", AttrMatch::new(keys, value), &["content"])
    };

    let og = |key: &str| {
        doc.first_attr(
            "meta",
            AttrMatch::new(PROPERTY_OR_NAME, key),
            &["content", "value"],
        )
    };

    let favicon =
        doc.any_attr_contains("link", "rel", "icon") || doc.source().contains("favicon.ico");

    OnPageSignals {
        title: doc.first_text("title").filter(|t| !t.is_empty()),
        meta_description: meta(NAME, "description"),
        canonical: doc.first_attr("link", AttrMatch::new(REL, "canonical"), &["href"]),
        viewport: meta(NAME, "viewport"),
        h1_count: doc.count("h1", None),
        open_graph: OpenGraph {
            title: og(OPEN_GRAPH_KEYS[0]),
            description: og(OPEN_GRAPH_KEYS[1]),
            image: og(OPEN_GRAPH_KEYS[2]),
            url: og(OPEN_GRAPH_KEYS[3]),
        },
        twitter_card: meta(NAME, "twitter:card"),
        structured_data_count: doc
            .count("script", Some(AttrMatch::new(TYPE, "application/ld+json"))),
        lang: doc.root_attr("lang"),
        favicon,
    }
}
