//! Retrieved artifacts handed to the check engine.

use std::collections::HashMap;

/// Header key carrying the raw status line, e.g. `HTTP/1.1 200 OK`.
pub const STATUS_HEADER: &str = "_status";

/// The six well-known resources fetched for every audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Home,
    Robots,
    Sitemap,
    LlmsTxt,
    LlmsFullTxt,
    SecurityTxt,
}

impl ResourceKind {
    /// Every resource except the home page, in fetch order.
    pub const AUXILIARY: [ResourceKind; 5] = [
        ResourceKind::Robots,
        ResourceKind::Sitemap,
        ResourceKind::LlmsTxt,
        ResourceKind::LlmsFullTxt,
        ResourceKind::SecurityTxt,
    ];

    /// Path under the audited origin.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Home => "/",
            ResourceKind::Robots => "/robots.txt",
            ResourceKind::Sitemap => "/sitemap.xml",
            ResourceKind::LlmsTxt => "/llms.txt",
            ResourceKind::LlmsFullTxt => "/llms-full.txt",
            ResourceKind::SecurityTxt => "/.well-known/security.txt",
        }
    }

    /// Bundle key of this resource.
    pub fn key(self) -> &'static str {
        match self {
            ResourceKind::Home => "home",
            ResourceKind::Robots => "robots",
            ResourceKind::Sitemap => "sitemap",
            ResourceKind::LlmsTxt => "llms_txt",
            ResourceKind::LlmsFullTxt => "llms_full_txt",
            ResourceKind::SecurityTxt => "security_txt",
        }
    }
}

/// Result of one retrieval. Absent fields mean the retrieval failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedResource {
    pub body: Option<String>,
    /// Lowercased header name -> value, plus [`STATUS_HEADER`].
    pub headers: HashMap<String, String>,
    /// Final URL after redirects.
    pub effective_url: Option<String>,
    /// Time to first byte of the header probe. Home page only.
    pub ttfb_millis: Option<u64>,
}

impl FetchedResource {
    /// A resource whose retrieval failed entirely.
    pub fn absent() -> Self {
        Self::default()
    }

    /// A resource with only a body, as in tests and canned bundles.
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::default()
        }
    }

    /// Body, if present and not blank.
    pub fn text(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.trim().is_empty())
    }

    /// Header lookup by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn status_line(&self) -> Option<&str> {
        self.header(STATUS_HEADER)
    }
}

/// The six resources of one audit, keyed by [`ResourceKind`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchBundle {
    pub home: FetchedResource,
    pub robots: FetchedResource,
    pub sitemap: FetchedResource,
    pub llms_txt: FetchedResource,
    pub llms_full_txt: FetchedResource,
    pub security_txt: FetchedResource,
}

impl FetchBundle {
    pub fn get(&self, kind: ResourceKind) -> &FetchedResource {
        match kind {
            ResourceKind::Home => &self.home,
            ResourceKind::Robots => &self.robots,
            ResourceKind::Sitemap => &self.sitemap,
            ResourceKind::LlmsTxt => &self.llms_txt,
            ResourceKind::LlmsFullTxt => &self.llms_full_txt,
            ResourceKind::SecurityTxt => &self.security_txt,
        }
    }

    pub fn set(&mut self, kind: ResourceKind, resource: FetchedResource) {
        match kind {
            ResourceKind::Home => self.home = resource,
            ResourceKind::Robots => self.robots = resource,
            ResourceKind::Sitemap => self.sitemap = resource,
            ResourceKind::LlmsTxt => self.llms_txt = resource,
            ResourceKind::LlmsFullTxt => self.llms_full_txt = resource,
            ResourceKind::SecurityTxt => self.security_txt = resource,
        }
    }

    /// Number of resources that came back with a usable body.
    pub fn retrieved_count(&self) -> usize {
        std::iter::once(ResourceKind::Home)
            .chain(ResourceKind::AUXILIARY)
            .filter(|k| self.get(*k).text().is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_body_is_not_text() {
        assert_eq!(FetchedResource::with_body("  \n").text(), None);
        assert_eq!(FetchedResource::with_body("x").text(), Some("x"));
        assert_eq!(FetchedResource::absent().text(), None);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut res = FetchedResource::absent();
        res.headers
            .insert("strict-transport-security".into(), "max-age=1".into());
        assert_eq!(res.header("Strict-Transport-Security"), Some("max-age=1"));
    }

    #[test]
    fn test_bundle_set_get() {
        let mut bundle = FetchBundle::default();
        bundle.set(ResourceKind::LlmsTxt, FetchedResource::with_body("# Site"));
        assert_eq!(bundle.get(ResourceKind::LlmsTxt).text(), Some("# Site"));
        assert_eq!(bundle.retrieved_count(), 1);
    }

    #[test]
    fn test_paths_and_keys() {
        assert_eq!(ResourceKind::SecurityTxt.path(), "/.well-known/security.txt");
        assert_eq!(ResourceKind::LlmsFullTxt.key(), "llms_full_txt");
    }
}
