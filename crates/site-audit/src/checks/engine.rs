//! Maps a fetched bundle to the four check sections.

use super::{ai_llm, crawlability, on_page, security, Sections};
use crate::acquisition::FetchBundle;
use crate::config::{AuditConfig, Thresholds};
use crate::signals::extract;

/// Pure evaluator: identical bundles always give identical sections.
#[derive(Debug, Clone)]
pub struct CheckEngine {
    thresholds: Thresholds,
    ai_crawlers: Vec<String>,
}

impl CheckEngine {
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            thresholds: config.thresholds,
            ai_crawlers: config.ai_crawlers.clone(),
        }
    }

    pub fn evaluate(&self, bundle: &FetchBundle) -> Sections {
        let page = extract(bundle.home.body.as_deref());

        Sections::new(vec![
            crawlability::evaluate(bundle, &self.thresholds),
            on_page::evaluate(&page, &self.thresholds),
            ai_llm::evaluate(bundle, &self.ai_crawlers),
            security::evaluate(&bundle.home),
        ])
    }
}

impl Default for CheckEngine {
    fn default() -> Self {
        Self::new(&AuditConfig::default())
    }
}
