//! Security response headers of the home page. None of these checks fail.

use super::policy::{CONTENT_SECURITY_POLICY, HSTS, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use super::{Check, Section, SectionName};
use crate::acquisition::FetchedResource;

pub fn evaluate(home: &FetchedResource) -> Section {
    let csp = home.header("content-security-policy");

    let mut section = Section::new(SectionName::Security);
    section.push(HSTS.key, hsts(home.header("strict-transport-security")));
    section.push(
        X_CONTENT_TYPE_OPTIONS.key,
        content_type_options(home.header("x-content-type-options")),
    );
    section.push(
        X_FRAME_OPTIONS.key,
        frame_options(home.header("x-frame-options"), csp),
    );
    section.push(CONTENT_SECURITY_POLICY.key, content_security_policy(csp));
    section
}

fn hsts(value: Option<&str>) -> Check {
    match value {
        Some(v) => HSTS.pass(v),
        None => HSTS.warn(
            "Missing",
            "Send Strict-Transport-Security: max-age=31536000; includeSubDomains.",
        ),
    }
}

fn content_type_options(value: Option<&str>) -> Check {
    const FIX: &str = "Send X-Content-Type-Options: nosniff.";
    match value {
        Some(v) if v.to_ascii_lowercase().contains("nosniff") => X_CONTENT_TYPE_OPTIONS.pass(v),
        Some(v) => X_CONTENT_TYPE_OPTIONS.warn(format!("Set to \"{v}\" without nosniff"), FIX),
        None => X_CONTENT_TYPE_OPTIONS.warn("Missing", FIX),
    }
}

fn frame_options(xfo: Option<&str>, csp: Option<&str>) -> Check {
    if let Some(v) = xfo {
        return X_FRAME_OPTIONS.pass(format!("X-Frame-Options: {v}"));
    }
    if csp.is_some_and(|c| c.to_ascii_lowercase().contains("frame-ancestors")) {
        return X_FRAME_OPTIONS.pass("CSP frame-ancestors");
    }
    X_FRAME_OPTIONS.warn(
        "Missing",
        "Send X-Frame-Options: SAMEORIGIN or a CSP frame-ancestors directive.",
    )
}

fn content_security_policy(csp: Option<&str>) -> Check {
    match csp {
        Some(v) => CONTENT_SECURITY_POLICY.pass(truncate(v, 80)),
        None => CONTENT_SECURITY_POLICY.warn(
            "Missing",
            "Define a Content-Security-Policy header, starting with default-src 'self'.",
        ),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}\u{2026}")
    } else {
        head
    }
}
