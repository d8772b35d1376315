//! End-to-end store behavior on a real database file: upsert semantics,
//! range queries, window values, metric listing, and alert-rule CRUD.

use std::sync::Arc;

use riskline_core::config::StorageConfig;
use riskline_core::models::{AlertRule, ScoredObservation, Severity};
use riskline_core::traits::{AlertRuleStore, ScoreStore};
use riskline_storage::{queries, StorageEngine};

fn make_score(metric: &str, timestamp: &str, value: f64) -> ScoredObservation {
    ScoredObservation {
        metric: metric.to_string(),
        timestamp: timestamp.to_string(),
        value,
        moving_avg_30d: Some(value - 10.0),
        pct_change: 1.25,
        risk_score: 7,
        severity: Severity::Normal,
        source_object_key: format!("raw/{metric}/{timestamp}.json"),
    }
}

fn open_engine(dir: &tempfile::TempDir) -> StorageEngine {
    StorageEngine::open(&dir.path().join("riskline.db")).unwrap()
}

#[test]
fn put_and_latest_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let engine = open_engine(&dir);

    let score = make_score("freight_cost_index", "2024-03-01T00:00:00Z", 1500.0);
    engine.put_score(&score).unwrap();

    let loaded = engine.latest("freight_cost_index").unwrap().unwrap();
    assert_eq!(loaded, score);
    assert_eq!(engine.latest("unknown_metric").unwrap(), None);
}

#[test]
fn colliding_key_overwrites_the_whole_row() {
    let dir = tempfile::tempdir().unwrap();
    let engine = open_engine(&dir);

    engine
        .put_score(&make_score("freight_cost_index", "2024-03-01T00:00:00Z", 1500.0))
        .unwrap();
    let mut corrected = make_score("freight_cost_index", "2024-03-01T00:00:00Z", 1600.0);
    corrected.moving_avg_30d = None;
    corrected.severity = Severity::Warning;
    engine.put_score(&corrected).unwrap();

    let rows = engine
        .query_range("freight_cost_index", "2024-03-01", "2024-03-01", 100)
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], corrected);
    assert_eq!(rows[0].moving_avg_30d, None);
}

#[test]
fn range_query_is_descending_with_inclusive_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let engine = open_engine(&dir);

    for day in ["2024-03-01", "2024-03-02", "2024-03-03", "2024-03-04"] {
        engine
            .put_score(&make_score("inflation_rate_cpi", &format!("{day}T00:00:00Z"), 100.0))
            .unwrap();
    }

    let rows = engine
        .query_range(
            "inflation_rate_cpi",
            "2024-03-02T00:00:00Z",
            "2024-03-04T00:00:00Z",
            100,
        )
        .unwrap();
    let timestamps: Vec<_> = rows.iter().map(|r| r.timestamp.as_str()).collect();
    assert_eq!(
        timestamps,
        [
            "2024-03-04T00:00:00Z",
            "2024-03-03T00:00:00Z",
            "2024-03-02T00:00:00Z"
        ]
    );
}

#[test]
fn bare_date_bounds_cover_the_full_day() {
    let dir = tempfile::tempdir().unwrap();
    let engine = open_engine(&dir);

    engine
        .put_score(&make_score("inflation_rate_cpi", "2024-03-01T06:00:00Z", 100.0))
        .unwrap();
    engine
        .put_score(&make_score("inflation_rate_cpi", "2024-03-01T23:30:00Z", 101.0))
        .unwrap();
    engine
        .put_score(&make_score("inflation_rate_cpi", "2024-03-02T00:00:00Z", 102.0))
        .unwrap();

    let rows = engine
        .query_range("inflation_rate_cpi", "2024-03-01", "2024-03-01", 100)
        .unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn range_query_respects_the_limit() {
    let dir = tempfile::tempdir().unwrap();
    let engine = open_engine(&dir);

    for day in 1..=5 {
        engine
            .put_score(&make_score(
                "inflation_rate_cpi",
                &format!("2024-03-0{day}T00:00:00Z"),
                100.0,
            ))
            .unwrap();
    }

    let rows = engine
        .query_range("inflation_rate_cpi", "2024-03-01", "2024-03-05", 2)
        .unwrap();
    assert_eq!(rows.len(), 2);
    // Newest first, so the limit keeps the most recent rows.
    assert_eq!(rows[0].timestamp, "2024-03-05T00:00:00Z");
    assert_eq!(rows[1].timestamp, "2024-03-04T00:00:00Z");
}

#[test]
fn window_values_exclude_the_upper_bound() {
    let dir = tempfile::tempdir().unwrap();
    let engine = open_engine(&dir);

    engine
        .put_score(&make_score("freight_cost_index", "2024-03-01T00:00:00Z", 10.0))
        .unwrap();
    engine
        .put_score(&make_score("freight_cost_index", "2024-03-02T00:00:00Z", 20.0))
        .unwrap();
    engine
        .put_score(&make_score("freight_cost_index", "2024-03-03T00:00:00Z", 30.0))
        .unwrap();

    let mut values = engine
        .values_in_window("freight_cost_index", "2024-03-01T00:00:00Z", "2024-03-03T00:00:00Z")
        .unwrap();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(values, [10.0, 20.0]);

    let empty = engine
        .values_in_window("freight_cost_index", "2024-04-01T00:00:00Z", "2024-05-01T00:00:00Z")
        .unwrap();
    assert!(empty.is_empty());
}

#[test]
fn list_metrics_is_sorted_and_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let engine = open_engine(&dir);

    engine
        .put_score(&make_score("port_congestion_rotterdam", "2024-03-01T00:00:00Z", 1.0))
        .unwrap();
    engine
        .put_score(&make_score("freight_cost_index", "2024-03-01T00:00:00Z", 2.0))
        .unwrap();
    engine
        .put_score(&make_score("freight_cost_index", "2024-03-02T00:00:00Z", 3.0))
        .unwrap();

    assert_eq!(
        engine.list_metrics().unwrap(),
        ["freight_cost_index", "port_congestion_rotterdam"]
    );
}

#[test]
fn in_memory_engine_shares_state_between_writer_and_readers() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let score = make_score("freight_cost_index", "2024-03-01T00:00:00Z", 1500.0);
    engine.put_score(&score).unwrap();
    assert_eq!(engine.latest("freight_cost_index").unwrap(), Some(score));
}

#[test]
fn reopening_the_same_file_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("riskline.db");

    {
        let engine = StorageEngine::open(&path).unwrap();
        engine
            .put_score(&make_score("inflation_rate_cpi", "2024-03-01T00:00:00Z", 3.2))
            .unwrap();
    }

    let engine = StorageEngine::open(&path).unwrap();
    assert!(engine.latest("inflation_rate_cpi").unwrap().is_some());
}

#[test]
fn alert_rule_crud_and_metric_index() {
    let dir = tempfile::tempdir().unwrap();
    let engine = open_engine(&dir);

    engine
        .put_rule(&AlertRule::new("user-1", "inflation_rate_cpi", 10.0))
        .unwrap();
    engine
        .put_rule(&AlertRule::new("user-1", "freight_cost_index", 5.0))
        .unwrap();
    engine
        .put_rule(&AlertRule::new("user-2", "freight_cost_index", 20.0))
        .unwrap();

    let user_rules = engine.rules_for_user("user-1").unwrap();
    let metrics: Vec<_> = user_rules.iter().map(|r| r.metric.as_str()).collect();
    assert_eq!(metrics, ["freight_cost_index", "inflation_rate_cpi"]);

    let metric_rules = engine.rules_for_metric("freight_cost_index").unwrap();
    let users: Vec<_> = metric_rules.iter().map(|r| r.user_id.as_str()).collect();
    assert_eq!(users, ["user-1", "user-2"]);

    // Upsert replaces the existing (user, metric) rule.
    let mut updated = AlertRule::new("user-1", "freight_cost_index", 7.5);
    updated.enabled = false;
    engine.put_rule(&updated).unwrap();
    let rules = engine.rules_for_user("user-1").unwrap();
    let freight = rules.iter().find(|r| r.metric == "freight_cost_index").unwrap();
    assert_eq!(freight.threshold, 7.5);
    assert!(!freight.enabled);

    engine.delete_rule("user-1", "freight_cost_index").unwrap();
    assert_eq!(engine.rules_for_user("user-1").unwrap().len(), 1);
    // Deleting an absent rule is a no-op.
    engine.delete_rule("user-1", "freight_cost_index").unwrap();
}

#[test]
fn open_with_config_uses_the_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        db_path: dir
            .path()
            .join("configured.db")
            .to_string_lossy()
            .into_owned(),
        read_pool_size: 2,
    };

    let engine = StorageEngine::open_with_config(&config).unwrap();
    engine
        .put_score(&make_score("inflation_rate_cpi", "2024-03-01T00:00:00Z", 3.2))
        .unwrap();
    assert!(dir.path().join("configured.db").exists());
    assert!(engine.latest("inflation_rate_cpi").unwrap().is_some());
}

#[test]
fn arc_shared_engine_is_a_store_capability() {
    fn put_one<S: ScoreStore>(store: &S, timestamp: &str) {
        store
            .put_score(&make_score("inflation_rate_cpi", timestamp, 1.0))
            .unwrap();
    }

    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(open_engine(&dir));

    put_one(&engine, "2024-03-01T00:00:00Z");
    let handle = std::thread::spawn({
        let engine = engine.clone();
        move || put_one(&engine, "2024-03-02T00:00:00Z")
    });
    handle.join().unwrap();

    let rows = engine
        .query_range("inflation_rate_cpi", "2024-03-01", "2024-03-02", 10)
        .unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn async_write_path_reaches_the_readers() {
    let dir = tempfile::tempdir().unwrap();
    let engine = open_engine(&dir);
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let score = make_score("inflation_rate_cpi", "2024-03-01T00:00:00Z", 3.2);
    rt.block_on(
        engine
            .pool()
            .writer
            .with_conn(|conn| queries::score_ops::upsert_score(conn, &score)),
    )
    .unwrap();

    assert_eq!(engine.latest("inflation_rate_cpi").unwrap(), Some(score));
}
