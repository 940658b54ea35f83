//! Audit configuration: every constant the engine depends on.
//!
//! The engine never reads globals. Timeouts, redirect caps, the AI crawler
//! list, section weights and check thresholds all travel in an
//! [`AuditConfig`] that is handed to the fetcher, the check engine and the
//! scorer. Every field has a default, so a config file only needs to name
//! what it changes.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Crawlers checked by the `ai_crawler_access` check.
pub const DEFAULT_AI_CRAWLERS: [&str; 5] = [
    "GPTBot",
    "ClaudeBot",
    "Google-Extended",
    "PerplexityBot",
    "Applebot-Extended",
];

/// Top-level audit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub fetch: FetchConfig,
    pub ai_crawlers: Vec<String>,
    pub weights: SectionWeights,
    pub thresholds: Thresholds,
    pub max_recommendations: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            ai_crawlers: DEFAULT_AI_CRAWLERS.iter().map(|s| s.to_string()).collect(),
            weights: SectionWeights::default(),
            thresholds: Thresholds::default(),
            max_recommendations: 10,
        }
    }
}

impl AuditConfig {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject weights that would make the score meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (section, value) in self.weights.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { section, value });
            }
        }
        Ok(())
    }
}

/// HTTP acquisition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Redirect cap for the home page probe and body fetch.
    pub home_max_redirects: usize,
    /// Redirect cap for robots.txt, sitemap.xml, llms.txt and friends.
    pub resource_max_redirects: usize,
    /// Maximum concurrent requests per audit.
    pub max_in_flight: usize,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            home_max_redirects: 3,
            resource_max_redirects: 2,
            max_in_flight: 6,
            user_agent: format!("site-audit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Concurrency bound, never below one.
    pub fn in_flight(&self) -> usize {
        self.max_in_flight.max(1)
    }
}

/// Contribution of each section to the overall score.
///
/// The defaults sum to 1.0. A section with no checks contributes nothing and
/// its weight is not handed to the others.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionWeights {
    pub crawlability: f64,
    pub on_page: f64,
    pub ai_llm: f64,
    pub security: f64,
}

impl Default for SectionWeights {
    fn default() -> Self {
        Self {
            crawlability: 0.25,
            on_page: 0.35,
            ai_llm: 0.25,
            security: 0.15,
        }
    }
}

impl SectionWeights {
    fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("crawlability", self.crawlability),
            ("on_page", self.on_page),
            ("ai_llm", self.ai_llm),
            ("security", self.security),
        ]
    }
}

/// Length and timing bands used by the check engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub title_min: usize,
    pub title_max: usize,
    pub description_min: usize,
    pub description_max: usize,
    /// TTFB strictly below this passes.
    pub ttfb_pass_below_ms: u64,
    /// TTFB at or above this fails.
    pub ttfb_fail_at_ms: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            title_min: 30,
            title_max: 60,
            description_min: 120,
            description_max: 160,
            ttfb_pass_below_ms: 400,
            ttfb_fail_at_ms: 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuditConfig::default();
        assert_eq!(config.fetch.timeout(), Duration::from_secs(5));
        assert_eq!(config.fetch.home_max_redirects, 3);
        assert_eq!(config.fetch.resource_max_redirects, 2);
        assert_eq!(config.ai_crawlers.len(), 5);
        assert_eq!(config.max_recommendations, 10);

        let w = config.weights;
        let sum = w.crawlability + w.on_page + w.ai_llm + w.security;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: AuditConfig =
            serde_json::from_str(r#"{"fetch": {"timeout_ms": 1500}, "max_recommendations": 3}"#)
                .unwrap();
        assert_eq!(config.fetch.timeout_ms, 1500);
        assert_eq!(config.fetch.max_in_flight, 6);
        assert_eq!(config.max_recommendations, 3);
        assert_eq!(config.thresholds, Thresholds::default());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = AuditConfig::default();
        config.weights.security = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeight { section: "security", .. })
        ));
    }

    #[test]
    fn test_zero_in_flight_clamped() {
        let fetch = FetchConfig {
            max_in_flight: 0,
            ..FetchConfig::default()
        };
        assert_eq!(fetch.in_flight(), 1);
    }
}
