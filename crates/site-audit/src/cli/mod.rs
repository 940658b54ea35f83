//! Rendering of audit reports for the `site-audit` binary.

pub mod audit_cmd;
pub mod output;
