//! Vendor payload parsers.
//!
//! Shapes are tried in a fixed order per source family; the first shape
//! that structurally matches wins, and a matching shape with bad fields
//! is an error rather than a fallthrough to the next shape.

use serde_json::Value;

use riskline_core::errors::IngestError;

use crate::record::ObservationRecord;

/// Series identifier assumed when a FRED payload omits `series_id`.
const DEFAULT_FRED_METRIC: &str = "inflation_rate_cpi";

/// Decode a raw payload body into JSON.
///
/// Only JSON content types are supported (`application/json` or any
/// `*json` subtype, matching what the upstream fetchers emit).
pub fn parse_payload(data: &[u8], content_type: &str) -> Result<Value, IngestError> {
    if content_type != "application/json" && !content_type.ends_with("json") {
        return Err(IngestError::UnsupportedContentType {
            content_type: content_type.to_string(),
        });
    }

    let text = std::str::from_utf8(data).map_err(|e| IngestError::InvalidJson {
        reason: format!("payload is not valid UTF-8: {e}"),
    })?;

    serde_json::from_str(text).map_err(|e| IngestError::InvalidJson {
        reason: e.to_string(),
    })
}

/// Parse a FRED economic-series payload into one observation record.
///
/// Two shapes are accepted:
/// - series: `{ "series_id": ..., "data": [ { "date", "value" }, ... ] }`,
///   where the last element is the latest reading;
/// - simplified: `{ "metric": ..., "value": ..., "date"|"timestamp": ... }`.
pub fn parse_fred(payload: &Value) -> Result<ObservationRecord, IngestError> {
    if let Some(series) = payload.get("data").and_then(Value::as_array) {
        let latest = series.last().ok_or(IngestError::UnrecognizedShape {
            source_name: "fred".to_string(),
        })?;

        let metric = payload
            .get("series_id")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_FRED_METRIC)
            .to_string();
        let value = require_finite(latest.get("value"), "value", &metric)?;
        let timestamp = require_timestamp(latest, &["date"])?;

        return Ok(emit(ObservationRecord {
            metric,
            value,
            timestamp,
            source: "fred".to_string(),
            port: None,
        }));
    }

    if payload.get("value").is_some() && payload.get("metric").is_some() {
        let metric = payload
            .get("metric")
            .and_then(Value::as_str)
            .ok_or(IngestError::MissingField {
                field: "metric".to_string(),
            })?
            .to_string();
        let value = require_finite(payload.get("value"), "value", &metric)?;
        let timestamp = require_timestamp(payload, &["date", "timestamp"])?;

        return Ok(emit(ObservationRecord {
            metric,
            value,
            timestamp,
            source: "fred".to_string(),
            port: None,
        }));
    }

    Err(IngestError::UnrecognizedShape {
        source_name: "fred".to_string(),
    })
}

/// Parse a logistics payload into observation records.
///
/// Three shapes are accepted, tried in order:
/// - multi-port: `{ "ports": [ { "port", "congestion_count"|"value",
///   "date"|"timestamp" }, ... ] }`;
/// - single-port: the same object without the wrapping list;
/// - freight index: `{ "freight_cost_index"|"freight_index": ...,
///   "date"|"timestamp": ... }`.
pub fn parse_port_congestion(payload: &Value) -> Result<Vec<ObservationRecord>, IngestError> {
    if let Some(ports) = payload.get("ports").and_then(Value::as_array) {
        let mut records = Vec::with_capacity(ports.len());
        for port_data in ports {
            records.push(parse_single_port(port_data)?);
        }
        return Ok(records);
    }

    if payload.get("port").is_some() || payload.get("congestion_count").is_some() {
        return Ok(vec![parse_single_port(payload)?]);
    }

    if let Some(raw) = payload
        .get("freight_cost_index")
        .or_else(|| payload.get("freight_index"))
    {
        let metric = "freight_cost_index".to_string();
        let value = require_finite(Some(raw), "freight_cost_index", &metric)?;
        let timestamp = require_timestamp(payload, &["date", "timestamp"])?;

        return Ok(vec![emit(ObservationRecord {
            metric,
            value,
            timestamp,
            source: "freight".to_string(),
            port: None,
        })]);
    }

    Err(IngestError::UnrecognizedShape {
        source_name: "port_congestion".to_string(),
    })
}

fn parse_single_port(port_data: &Value) -> Result<ObservationRecord, IngestError> {
    let port = port_data
        .get("port")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    let metric = format!("port_congestion_{port}");

    let raw = port_data
        .get("congestion_count")
        .or_else(|| port_data.get("value"));
    let value = require_finite(raw, "congestion_count", &metric)?;
    let timestamp = require_timestamp(port_data, &["date", "timestamp"])?;

    Ok(emit(ObservationRecord {
        metric,
        value,
        timestamp,
        source: "port_congestion".to_string(),
        port: Some(port),
    }))
}

/// Coerce a JSON value to a finite f64. Numbers are taken as-is; numeric
/// strings are accepted because some vendors quote their numbers.
fn require_finite(raw: Option<&Value>, field: &str, metric: &str) -> Result<f64, IngestError> {
    let raw = raw.ok_or(IngestError::MissingField {
        field: field.to_string(),
    })?;

    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(IngestError::NonFiniteValue {
            metric: metric.to_string(),
        }),
    }
}

fn require_timestamp(obj: &Value, fields: &[&str]) -> Result<String, IngestError> {
    for field in fields {
        if let Some(ts) = obj.get(*field).and_then(Value::as_str) {
            return Ok(ts.to_string());
        }
    }
    Err(IngestError::MissingField {
        field: fields[0].to_string(),
    })
}

fn emit(record: ObservationRecord) -> ObservationRecord {
    tracing::debug!(
        metric = %record.metric,
        source = %record.source,
        timestamp = %record.timestamp,
        "parsed observation record"
    );
    record
}
