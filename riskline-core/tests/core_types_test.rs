//! Severity semantics, model serialization, config defaults, and the
//! retryability split of the error taxonomy.

use riskline_core::config::RisklineConfig;
use riskline_core::errors::{IngestError, RisklineError, ScoringError, StorageError};
use riskline_core::models::{AlertRule, ScoredObservation, Severity};
use riskline_core::time::is_canonical;

#[test]
fn severity_orders_by_increasing_badness() {
    assert!(Severity::Normal < Severity::Warning);
    assert!(Severity::Warning < Severity::Critical);
    assert_eq!(
        [Severity::Critical, Severity::Normal, Severity::Warning]
            .iter()
            .max(),
        Some(&Severity::Critical)
    );
}

#[test]
fn severity_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&Severity::Warning).unwrap(),
        "\"warning\""
    );
    assert_eq!(
        serde_json::from_str::<Severity>("\"critical\"").unwrap(),
        Severity::Critical
    );
}

#[test]
fn severity_string_round_trip() {
    for sev in [Severity::Normal, Severity::Warning, Severity::Critical] {
        assert_eq!(sev.as_str().parse::<Severity>().unwrap(), sev);
    }
    assert!("elevated".parse::<Severity>().is_err());
}

#[test]
fn scored_observation_serde_keeps_absent_average_distinct() {
    let scored = ScoredObservation {
        metric: "freight_cost_index".to_string(),
        timestamp: "2024-03-01T00:00:00Z".to_string(),
        value: 1500.0,
        moving_avg_30d: None,
        pct_change: 0.0,
        risk_score: 0,
        severity: Severity::Normal,
        source_object_key: "raw/freight/2024-03-01.json".to_string(),
    };

    let json = serde_json::to_value(&scored).unwrap();
    assert!(json["moving_avg_30d"].is_null());

    let back: ScoredObservation = serde_json::from_value(json).unwrap();
    assert_eq!(back, scored);
}

#[test]
fn new_alert_rule_is_enabled_and_stamped() {
    let rule = AlertRule::new("user-1", "inflation_rate_cpi", 10.0);
    assert!(rule.enabled);
    assert!(is_canonical(&rule.created_at));
}

#[test]
fn config_defaults_and_partial_toml() {
    let config = RisklineConfig::default();
    assert_eq!(config.scoring.window_days, 30);
    assert_eq!(config.storage.db_path, "riskline.db");

    let config = RisklineConfig::from_toml_str("[scoring]\nwindow_days = 7\n").unwrap();
    assert_eq!(config.scoring.window_days, 7);
    assert_eq!(config.storage.db_path, "riskline.db");

    assert!(RisklineConfig::from_toml_str("not toml [").is_err());
}

#[test]
fn config_loads_from_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("riskline.toml");
    std::fs::write(&path, "[storage]\ndb_path = \"/var/lib/riskline/riskline.db\"\n").unwrap();

    let config = RisklineConfig::load(&path).unwrap();
    assert_eq!(config.storage.db_path, "/var/lib/riskline/riskline.db");

    let err = RisklineConfig::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, RisklineError::Config { .. }));
    assert!(!err.is_retryable());
}

#[test]
fn store_failures_are_retryable_and_input_failures_are_not() {
    let retryable: RisklineError = StorageError::QueryFailed {
        reason: "database is locked".to_string(),
    }
    .into();
    assert!(retryable.is_retryable());

    let retryable: RisklineError = ScoringError::PersistFailed {
        metric: "freight_cost_index".to_string(),
        timestamp: "2024-03-01T00:00:00Z".to_string(),
        reason: "timeout".to_string(),
    }
    .into();
    assert!(retryable.is_retryable());

    let terminal: RisklineError = IngestError::MissingField {
        field: "value".to_string(),
    }
    .into();
    assert!(!terminal.is_retryable());

    let terminal: RisklineError = StorageError::MigrationFailed {
        reason: "bad schema".to_string(),
    }
    .into();
    assert!(!terminal.is_retryable());
}
