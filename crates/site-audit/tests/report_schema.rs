//! The literal JSON shape of an audit report.

use assert_json_diff::{assert_json_eq, assert_json_include};
use serde_json::{json, Value};
use site_audit::acquisition::{FetchBundle, FetchedResource, StaticSource};
use site_audit::{AuditConfig, AuditReport, AuditService, Auditor};
use std::sync::Arc;

const SECTION_KEYS: [(&str, &[&str]); 4] = [
    ("crawlability", &["https", "robots_txt", "sitemap", "response_time"]),
    (
        "on_page",
        &[
            "title",
            "meta_description",
            "canonical",
            "viewport",
            "h1",
            "open_graph",
            "twitter_card",
            "structured_data",
            "lang",
            "favicon",
        ],
    ),
    ("ai_llm", &["llms_txt", "llms_full_txt", "ai_crawler_access", "security_txt"]),
    (
        "security",
        &["hsts", "x_content_type_options", "x_frame_options", "content_security_policy"],
    ),
];

fn audit(bundle: FetchBundle, domain: &str) -> Value {
    let auditor = Auditor::with_source(AuditConfig::default(), Arc::new(StaticSource::new(bundle)));
    let report = tokio_test::block_on(auditor.run_audit(domain));
    serde_json::to_value(&report).unwrap()
}

fn keys(value: &Value) -> Vec<&str> {
    value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect()
}

fn sorted(keys: &[&str]) -> Vec<String> {
    let mut v: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
    v.sort();
    v
}

fn site() -> FetchBundle {
    let mut home = FetchedResource::with_body(
        r#"<html lang="en"><head>
        <title>Acme widgets for people who need widgets</title>
        <meta name="viewport" content="width=device-width, initial-scale=1">
        <meta property="og:title" content="Acme">
        <link rel="icon" href="/favicon.ico">
        </head><body><h1>Acme</h1><h1>Again</h1></body></html>"#,
    );
    home.effective_url = Some("https://acme.test/".into());
    home.ttfb_millis = Some(650);
    home.headers
        .insert("x-frame-options".into(), "SAMEORIGIN".into());

    FetchBundle {
        home,
        robots: FetchedResource::with_body("User-agent: GPTBot\nDisallow: /"),
        llms_txt: FetchedResource::with_body("# Acme\n> Widgets."),
        ..FetchBundle::default()
    }
}

#[test]
fn test_top_level_keys() {
    let report = audit(site(), "acme.test");
    assert_eq!(
        sorted(&keys(&report)),
        sorted(&["domain", "error", "score", "grade", "sections", "recommendations"])
    );
    assert!(report["error"].is_null());
    assert!(report["score"].as_u64().unwrap() <= 100);
    assert!(["A", "B", "C", "D", "F"].contains(&report["grade"].as_str().unwrap()));
}

#[test]
fn test_section_and_check_keys_are_exact() {
    let report = audit(site(), "acme.test");
    let sections = &report["sections"];

    let names: Vec<&str> = SECTION_KEYS.iter().map(|(n, _)| *n).collect();
    assert_eq!(sorted(&keys(sections)), sorted(&names));

    for (name, expected) in SECTION_KEYS {
        let section = &sections[name];
        assert_eq!(sorted(&keys(section)), sorted(expected), "{name}");
        for key in expected {
            let check = &section[*key];
            assert_eq!(
                sorted(&keys(check)),
                sorted(&["status", "label", "value", "fix"]),
                "{name}.{key}"
            );
            let status = check["status"].as_str().unwrap();
            assert!(["pass", "warn", "fail"].contains(&status));
            assert_eq!(status == "pass", check["fix"].is_null(), "{name}.{key}");
        }
    }
}

#[test]
fn test_serialized_order_follows_declaration() {
    let auditor = Auditor::with_source(
        AuditConfig::default(),
        Arc::new(StaticSource::new(site())),
    );
    let report = tokio_test::block_on(auditor.run_audit("acme.test"));
    let text = serde_json::to_string(&report).unwrap();

    let positions: Vec<usize> = SECTION_KEYS
        .iter()
        .flat_map(|(name, checks)| std::iter::once(*name).chain(checks.iter().copied()))
        .map(|key| text.find(&format!("\"{key}\":")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_check_values() {
    let report = audit(site(), "acme.test");
    assert_json_include!(
        actual: report,
        expected: json!({
            "domain": "acme.test",
            "sections": {
                "crawlability": {
                    "https": { "status": "pass", "label": "HTTPS" },
                    "response_time": { "status": "warn" },
                    "sitemap": { "status": "fail" }
                },
                "on_page": {
                    "h1": { "status": "warn", "value": "2 found" },
                    "favicon": { "status": "pass" },
                    "open_graph": { "value": "Missing og:description, og:image, og:url" }
                },
                "ai_llm": {
                    "llms_txt": { "status": "pass", "fix": null },
                    "ai_crawler_access": { "status": "warn", "value": "Blocked: GPTBot" }
                },
                "security": {
                    "x_frame_options": { "status": "pass" }
                }
            }
        })
    );
}

#[test]
fn test_empty_domain_error_report() {
    let report = audit(site(), "   ");
    assert_json_eq!(
        report,
        json!({
            "domain": "",
            "error": "Please enter a domain (e.g. example.com).",
            "score": 0,
            "grade": "F",
            "sections": {},
            "recommendations": []
        })
    );
    assert_eq!(
        serde_json::to_value(AuditReport::empty_domain()).unwrap(),
        report
    );
}

#[test]
fn test_recommendations_shape() {
    let report = audit(FetchBundle::default(), "down.test");
    let recs = report["recommendations"].as_array().unwrap();
    assert!(!recs.is_empty());
    assert!(recs.len() <= 10);
    for rec in recs {
        let text = rec.as_str().unwrap();
        assert!(text.contains(": "), "{text}");
    }
}
