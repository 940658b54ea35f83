//! Website audit engine.
//!
//! Fetches six well-known resources of a site, derives graded checks in four
//! sections (crawlability, on-page SEO, AI/LLM readiness, security headers)
//! and folds them into a weighted 0-100 score, a letter grade and a short
//! list of recommendations.

pub mod acquisition;
pub mod audit;
pub mod checks;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod report;
pub mod scoring;
pub mod signals;

pub use audit::{AuditService, Auditor};
pub use config::AuditConfig;
pub use report::AuditReport;
