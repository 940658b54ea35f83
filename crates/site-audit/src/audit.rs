//! The invocation contract: one domain in, one [`AuditReport`] out.

use crate::acquisition::{Fetcher, ResourceSource};
use crate::checks::CheckEngine;
use crate::config::AuditConfig;
use crate::domain::{https_origin, normalize_domain};
use crate::error::FetchError;
use crate::report::AuditReport;
use crate::scoring::{self, Grade};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Runs a complete audit. Never fails: every problem ends up in the report.
#[async_trait]
pub trait AuditService: Send + Sync {
    async fn run_audit(&self, domain: &str) -> AuditReport;
}

/// Fetch, evaluate and score a site.
pub struct Auditor {
    config: AuditConfig,
    engine: CheckEngine,
    source: Arc<dyn ResourceSource>,
}

impl Auditor {
    /// Auditor backed by the live HTTP fetcher.
    pub fn new(config: AuditConfig) -> Result<Self, FetchError> {
        let fetcher = Fetcher::new(&config.fetch)?;
        Ok(Self::with_source(config, Arc::new(fetcher)))
    }

    /// Auditor backed by any [`ResourceSource`].
    pub fn with_source(config: AuditConfig, source: Arc<dyn ResourceSource>) -> Self {
        Self {
            engine: CheckEngine::new(&config),
            config,
            source,
        }
    }
}

#[async_trait]
impl AuditService for Auditor {
    async fn run_audit(&self, domain: &str) -> AuditReport {
        let domain = normalize_domain(domain);
        if domain.is_empty() {
            return AuditReport::empty_domain();
        }

        let start = Instant::now();
        let origin = https_origin(&domain);
        info!(%domain, %origin, "audit started");

        let bundle = self.source.fetch_all(&origin).await;
        let sections = self.engine.evaluate(&bundle);
        let score = scoring::score(&sections, &self.config.weights);
        let grade = Grade::from_score(score);
        let recommendations =
            scoring::recommendations(&sections, self.config.max_recommendations);

        info!(
            %domain,
            score,
            grade = grade.as_str(),
            retrieved = bundle.retrieved_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "audit complete"
        );

        AuditReport {
            domain,
            error: None,
            score,
            grade,
            sections,
            recommendations,
        }
    }
}
