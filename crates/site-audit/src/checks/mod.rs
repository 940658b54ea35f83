//! Check model and the four check sections.
//!
//! A [`Check`] is one graded observation. A [`Section`] keeps its checks in
//! declaration order and serializes as a JSON object with keys in that order.

pub mod ai_llm;
pub mod crawlability;
pub mod engine;
pub mod on_page;
pub mod policy;
pub mod security;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

pub use engine::CheckEngine;
pub use policy::CheckRule;

/// Verdict of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Warn,
    Fail,
}

impl Status {
    /// Score points: pass 100, warn 50, fail 0.
    pub fn points(self) -> f64 {
        match self {
            Status::Pass => 100.0,
            Status::Warn => 50.0,
            Status::Fail => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Warn => "warn",
            Status::Fail => "fail",
        }
    }
}

/// One graded check result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub status: Status,
    pub label: String,
    /// Human-readable summary of what was observed.
    pub value: String,
    /// One-line remediation; always `None` for passing checks.
    pub fix: Option<String>,
}

/// The four sections, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    Crawlability,
    OnPage,
    AiLlm,
    Security,
}

impl SectionName {
    pub const ALL: [SectionName; 4] = [
        SectionName::Crawlability,
        SectionName::OnPage,
        SectionName::AiLlm,
        SectionName::Security,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SectionName::Crawlability => "crawlability",
            SectionName::OnPage => "on_page",
            SectionName::AiLlm => "ai_llm",
            SectionName::Security => "security",
        }
    }

    /// Display title.
    pub fn title(self) -> &'static str {
        match self {
            SectionName::Crawlability => "Crawlability",
            SectionName::OnPage => "On-page SEO",
            SectionName::AiLlm => "AI / LLM readiness",
            SectionName::Security => "Security headers",
        }
    }
}

/// Checks of one section, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: SectionName,
    checks: Vec<(&'static str, Check)>,
}

impl Section {
    pub fn new(name: SectionName) -> Self {
        Self {
            name,
            checks: Vec::new(),
        }
    }

    pub fn push(&mut self, key: &'static str, check: Check) {
        self.checks.push((key, check));
    }

    pub fn get(&self, key: &str) -> Option<&Check> {
        self.checks.iter().find(|(k, _)| *k == key).map(|(_, c)| c)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.checks.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Check)> {
        self.checks.iter().map(|(k, c)| (*k, c))
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.checks.len()))?;
        for (key, check) in &self.checks {
            map.serialize_entry(key, check)?;
        }
        map.end()
    }
}

/// All sections of a report, in report order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sections(Vec<Section>);

impl Sections {
    pub fn new(sections: Vec<Section>) -> Self {
        Self(sections)
    }

    pub fn get(&self, name: SectionName) -> Option<&Section> {
        self.0.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.0.iter()
    }

    /// Look up a check by section and key.
    pub fn check(&self, name: SectionName, key: &str) -> Option<&Check> {
        self.get(name).and_then(|s| s.get(key))
    }
}

impl Serialize for Sections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for section in &self.0 {
            map.serialize_entry(section.name.key(), section)?;
        }
        map.end()
    }
}
