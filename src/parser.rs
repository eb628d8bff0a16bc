//! JSON parser for the backend report endpoint.
//!
//! The backend returns loosely typed rows. Each row is validated into its
//! record type here; rows that fail validation are logged and dropped so one
//! bad reading never poisons a whole day of numeric aggregation.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ReportError;
use crate::report::types::{
    FeedEvent, LightEvent, LightStatus, ReportPayload, SensorSample, WaterQuality,
};

#[derive(Deserialize)]
struct RawReport {
    #[serde(default)]
    sensor: Option<Vec<Value>>,
    #[serde(default)]
    feeding: Option<Vec<Value>>,
    #[serde(default)]
    light: Option<Vec<Value>>,
}

/// Decodes a report body of the form
/// `{ "sensor": [...], "feeding": [...], "light": [...] }`.
///
/// Missing arrays are treated as empty.
///
/// # Errors
///
/// Returns an error if the bytes are not JSON or the top level is not an
/// object of arrays. Individual malformed rows are skipped, not errors.
pub fn parse_report(bytes: &[u8]) -> Result<ReportPayload> {
    let body: Value = serde_json::from_slice(bytes).context("report body is not valid JSON")?;
    if !body.is_object() {
        anyhow::bail!("report body must be a JSON object, got {}", json_kind(&body));
    }
    let raw: RawReport =
        serde_json::from_value(body).context("report body is not a valid report object")?;

    let sensor = validate_rows("sensor", raw.sensor.unwrap_or_default(), parse_sensor);
    let light = validate_rows("light", raw.light.unwrap_or_default(), parse_light);
    let feed = validate_rows("feeding", raw.feeding.unwrap_or_default(), parse_feed);

    debug!(
        sensor = sensor.len(),
        light = light.len(),
        feed = feed.len(),
        "Report parsed"
    );

    Ok(ReportPayload {
        sensor,
        light,
        feed,
    })
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn validate_rows<T>(
    kind: &str,
    rows: Vec<Value>,
    parse: impl Fn(usize, &Value) -> Result<T, ReportError>,
) -> Vec<T> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| match parse(index, row) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(kind, error = %e, "Skipping malformed report row");
                None
            }
        })
        .collect()
}

/// Parses one sensor row.
pub fn parse_sensor(index: usize, row: &Value) -> Result<SensorSample, ReportError> {
    let quality = match row.get("eval") {
        None | Some(Value::Null) => None,
        Some(v) => Some(parse_quality(index, v)?),
    };

    Ok(SensorSample {
        date: date_field(index, row)?,
        time: time_field(index, row)?,
        temp: number_field(index, row, "temp")?,
        ph: number_field(index, row, "ph")?,
        tds: number_field(index, row, "tds")?,
        water_level: number_field(index, row, "waterLv")?,
        quality,
    })
}

/// Parses one light row.
pub fn parse_light(index: usize, row: &Value) -> Result<LightEvent, ReportError> {
    let status = match str_field(index, row, "status")? {
        "ON" => LightStatus::On,
        "OFF" => LightStatus::Off,
        other => return Err(malformed(index, format!("unknown light status '{other}'"))),
    };

    Ok(LightEvent {
        date: date_field(index, row)?,
        time: time_field(index, row)?,
        status,
    })
}

/// Parses one feeding row.
pub fn parse_feed(index: usize, row: &Value) -> Result<FeedEvent, ReportError> {
    Ok(FeedEvent {
        date: date_field(index, row)?,
        time: time_field(index, row)?,
        data: row.get("data").and_then(Value::as_str).map(str::to_string),
    })
}

fn parse_quality(index: usize, v: &Value) -> Result<WaterQuality, ReportError> {
    match v.as_str() {
        Some("Green") => Ok(WaterQuality::Green),
        Some("Orange") => Ok(WaterQuality::Orange),
        Some("Red") => Ok(WaterQuality::Red),
        _ => Err(malformed(index, format!("unknown eval {v}"))),
    }
}

fn date_field(index: usize, row: &Value) -> Result<NaiveDate, ReportError> {
    let s = str_field(index, row, "date")?;
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| malformed(index, format!("bad date '{s}': {e}")))
}

/// Times come as `HH:MM` from the backend; `HH:MM:SS` is accepted too.
fn time_field(index: usize, row: &Value) -> Result<NaiveTime, ReportError> {
    let s = str_field(index, row, "time")?;
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|e| malformed(index, format!("bad time '{s}': {e}")))
}

fn str_field<'a>(index: usize, row: &'a Value, name: &str) -> Result<&'a str, ReportError> {
    row.get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(index, format!("missing string field '{name}'")))
}

fn number_field(index: usize, row: &Value, name: &str) -> Result<f64, ReportError> {
    let value = match row.get(name) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| malformed(index, format!("missing numeric field '{name}'")))
}

fn malformed(index: usize, reason: String) -> ReportError {
    ReportError::MalformedRecord { index, reason }
}
