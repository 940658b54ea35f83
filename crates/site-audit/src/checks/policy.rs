//! Static severity policy: which verdicts each check may reach.
//!
//! Blocking problems (no HTTPS, a root-blocked robots.txt, no sitemap, slow
//! responses, missing title/description/viewport/H1, no llms.txt) can fail.
//! Everything else is a best-practice gap and tops out at warn. The tables
//! below are the single source of truth for keys, labels and that ceiling.

use super::{Check, SectionName, Status};

/// Which verdicts a check can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// May fail.
    Blocking,
    /// Never fails; tops out at warn.
    Advisory,
}

impl Severity {
    pub fn allows(self, status: Status) -> bool {
        match self {
            Severity::Blocking => true,
            Severity::Advisory => status != Status::Fail,
        }
    }
}

/// Key, label and severity of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckRule {
    pub key: &'static str,
    pub label: &'static str,
    pub severity: Severity,
}

impl CheckRule {
    const fn new(key: &'static str, label: &'static str, severity: Severity) -> Self {
        Self {
            key,
            label,
            severity,
        }
    }

    pub fn pass(&self, value: impl Into<String>) -> Check {
        self.check(Status::Pass, value.into(), None)
    }

    pub fn warn(&self, value: impl Into<String>, fix: &str) -> Check {
        self.check(Status::Warn, value.into(), Some(fix))
    }

    pub fn fail(&self, value: impl Into<String>, fix: &str) -> Check {
        self.check(Status::Fail, value.into(), Some(fix))
    }

    /// Build a check, capping the verdict at what this check may reach.
    fn check(&self, status: Status, value: String, fix: Option<&str>) -> Check {
        debug_assert!(
            self.severity.allows(status),
            "{} cannot be {}",
            self.key,
            status.as_str()
        );
        let status = if self.severity.allows(status) {
            status
        } else {
            Status::Warn
        };
        Check {
            status,
            label: self.label.to_string(),
            value,
            fix: match status {
                Status::Pass => None,
                _ => fix.filter(|f| !f.is_empty()).map(str::to_string),
            },
        }
    }
}

use Severity::{Advisory, Blocking};

pub const HTTPS: CheckRule = CheckRule::new("https", "HTTPS", Blocking);
pub const ROBOTS_TXT: CheckRule = CheckRule::new("robots_txt", "robots.txt", Blocking);
pub const SITEMAP: CheckRule = CheckRule::new("sitemap", "XML sitemap", Blocking);
pub const RESPONSE_TIME: CheckRule = CheckRule::new("response_time", "Response time", Blocking);

pub const TITLE: CheckRule = CheckRule::new("title", "Title tag", Blocking);
pub const META_DESCRIPTION: CheckRule =
    CheckRule::new("meta_description", "Meta description", Blocking);
pub const CANONICAL: CheckRule = CheckRule::new("canonical", "Canonical URL", Advisory);
pub const VIEWPORT: CheckRule = CheckRule::new("viewport", "Viewport meta tag", Blocking);
pub const H1: CheckRule = CheckRule::new("h1", "H1 heading", Blocking);
pub const OPEN_GRAPH: CheckRule = CheckRule::new("open_graph", "Open Graph tags", Advisory);
pub const TWITTER_CARD: CheckRule = CheckRule::new("twitter_card", "Twitter card", Advisory);
pub const STRUCTURED_DATA: CheckRule =
    CheckRule::new("structured_data", "Structured data (JSON-LD)", Advisory);
pub const LANG: CheckRule = CheckRule::new("lang", "Language attribute", Advisory);
pub const FAVICON: CheckRule = CheckRule::new("favicon", "Favicon", Advisory);

pub const LLMS_TXT: CheckRule = CheckRule::new("llms_txt", "llms.txt", Blocking);
pub const LLMS_FULL_TXT: CheckRule = CheckRule::new("llms_full_txt", "llms-full.txt", Advisory);
pub const AI_CRAWLER_ACCESS: CheckRule =
    CheckRule::new("ai_crawler_access", "AI crawler access", Advisory);
pub const SECURITY_TXT: CheckRule = CheckRule::new("security_txt", "security.txt", Advisory);

pub const HSTS: CheckRule = CheckRule::new("hsts", "HSTS", Advisory);
pub const X_CONTENT_TYPE_OPTIONS: CheckRule =
    CheckRule::new("x_content_type_options", "X-Content-Type-Options", Advisory);
pub const X_FRAME_OPTIONS: CheckRule =
    CheckRule::new("x_frame_options", "Clickjacking protection", Advisory);
pub const CONTENT_SECURITY_POLICY: CheckRule =
    CheckRule::new("content_security_policy", "Content-Security-Policy", Advisory);

pub const CRAWLABILITY_CHECKS: [CheckRule; 4] = [HTTPS, ROBOTS_TXT, SITEMAP, RESPONSE_TIME];

pub const ON_PAGE_CHECKS: [CheckRule; 10] = [
    TITLE,
    META_DESCRIPTION,
    CANONICAL,
    VIEWPORT,
    H1,
    OPEN_GRAPH,
    TWITTER_CARD,
    STRUCTURED_DATA,
    LANG,
    FAVICON,
];

pub const AI_LLM_CHECKS: [CheckRule; 4] =
    [LLMS_TXT, LLMS_FULL_TXT, AI_CRAWLER_ACCESS, SECURITY_TXT];

pub const SECURITY_CHECKS: [CheckRule; 4] = [
    HSTS,
    X_CONTENT_TYPE_OPTIONS,
    X_FRAME_OPTIONS,
    CONTENT_SECURITY_POLICY,
];

/// Declared checks of a section, in order.
pub fn checks_for(section: SectionName) -> &'static [CheckRule] {
    match section {
        SectionName::Crawlability => &CRAWLABILITY_CHECKS,
        SectionName::OnPage => &ON_PAGE_CHECKS,
        SectionName::AiLlm => &AI_LLM_CHECKS,
        SectionName::Security => &SECURITY_CHECKS,
    }
}
