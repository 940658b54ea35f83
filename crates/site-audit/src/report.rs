//! The audit report handed to renderers.
//!
//! Field order is part of the external schema: `domain, error, score, grade,
//! sections, recommendations`.

use crate::checks::Sections;
use crate::scoring::Grade;
use serde::Serialize;

/// Error text for an empty domain.
pub const EMPTY_DOMAIN_ERROR: &str = "Please enter a domain (e.g. example.com).";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub domain: String,
    /// Set only for input errors; sections are then empty.
    pub error: Option<String>,
    pub score: u8,
    pub grade: Grade,
    pub sections: Sections,
    pub recommendations: Vec<String>,
}

impl AuditReport {
    /// Zeroed report returned when the normalized domain is empty.
    pub fn empty_domain() -> Self {
        Self {
            domain: String::new(),
            error: Some(EMPTY_DOMAIN_ERROR.to_string()),
            score: 0,
            grade: Grade::F,
            sections: Sections::default(),
            recommendations: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
