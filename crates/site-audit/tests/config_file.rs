//! Loading audit configuration from JSON files on disk.

use site_audit::config::{AuditConfig, SectionWeights, Thresholds};
use site_audit::error::ConfigError;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_partial_file_overrides_only_named_fields() {
    let file = write_config(
        r#"{
            "fetch": { "timeout_ms": 1500, "max_in_flight": 2 },
            "ai_crawlers": ["CCBot"],
            "thresholds": { "title_max": 70 }
        }"#,
    );
    let config = AuditConfig::load(file.path()).unwrap();
    let defaults = AuditConfig::default();

    assert_eq!(config.fetch.timeout_ms, 1500);
    assert_eq!(config.fetch.in_flight(), 2);
    assert_eq!(config.fetch.home_max_redirects, 3);
    assert_eq!(config.fetch.user_agent, defaults.fetch.user_agent);
    assert_eq!(config.ai_crawlers, ["CCBot"]);
    assert_eq!(config.thresholds.title_max, 70);
    assert_eq!(config.thresholds.title_min, Thresholds::default().title_min);
    assert_eq!(config.weights, SectionWeights::default());
    assert_eq!(config.max_recommendations, 10);
}

#[test]
fn test_empty_object_is_default() {
    let file = write_config("{}");
    assert_eq!(AuditConfig::load(file.path()).unwrap(), AuditConfig::default());
}

#[test]
fn test_malformed_file() {
    let file = write_config("{ \"fetch\": ");
    let err = AuditConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
}

#[test]
fn test_wrong_type_is_rejected() {
    let file = write_config(r#"{ "fetch": { "timeout_ms": "fast" } }"#);
    assert!(matches!(
        AuditConfig::load(file.path()),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    let err = AuditConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn test_negative_weight_is_rejected() {
    let file = write_config(r#"{ "weights": { "security": -0.5 } }"#);
    match AuditConfig::load(file.path()) {
        Err(ConfigError::InvalidWeight { section, value }) => {
            assert_eq!(section, "security");
            assert_eq!(value, -0.5);
        }
        other => panic!("expected InvalidWeight, got {other:?}"),
    }
}

#[test]
fn test_zero_in_flight_is_clamped() {
    let file = write_config(r#"{ "fetch": { "max_in_flight": 0 } }"#);
    let config = AuditConfig::load(file.path()).unwrap();
    assert_eq!(config.fetch.in_flight(), 1);
}
