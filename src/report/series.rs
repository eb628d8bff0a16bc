use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::error::ReportError;
use crate::report::aggregate::hourly_mode;
use crate::report::parameter::Parameter;
use crate::report::types::{ReportPayload, ReportSeries};
use crate::report::window::{filter_day, resolve_day};

/// Builds the three chart series for one day of the report window.
///
/// The sensor series holds the hourly mode of `parameter`. Light and feed
/// events are discrete markers and pass through untouched.
#[tracing::instrument(skip(payload, now), fields(sensor = payload.sensor.len()))]
pub fn build_report_series(
    payload: &ReportPayload,
    day_offset: usize,
    parameter: Parameter,
    tz: Tz,
    now: DateTime<Utc>,
) -> Result<ReportSeries, ReportError> {
    let resolved_date = resolve_day(tz, now, day_offset)?;

    let day_samples = filter_day(&payload.sensor, resolved_date);
    let sensor_series = hourly_mode(&day_samples, parameter, tz)?;
    let light_series = filter_day(&payload.light, resolved_date);
    let feed_series = filter_day(&payload.feed, resolved_date);

    debug!(
        date = %resolved_date,
        samples = day_samples.len(),
        hours = sensor_series.len(),
        light = light_series.len(),
        feed = feed_series.len(),
        "Report series built"
    );

    Ok(ReportSeries {
        resolved_date,
        parameter,
        sensor_series,
        light_series,
        feed_series,
    })
}

/// Y value of a chart point: a sensor reading or an actuator status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartValue {
    Number(f64),
    Status(&'static str),
}

/// One `{x, y}` point in the shape the charting front end consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: ChartValue,
}

/// Chart-ready rendering of a [`ReportSeries`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub date: NaiveDate,
    pub parameter: Parameter,
    pub unit: &'static str,
    pub axis_max: f64,
    pub sensor: Vec<ChartPoint>,
    pub light: Vec<ChartPoint>,
    pub feed: Vec<ChartPoint>,
}

impl ChartData {
    pub fn from_series(series: &ReportSeries) -> Self {
        let p = series.parameter;

        let sensor = series
            .sensor_series
            .iter()
            .map(|s| ChartPoint {
                x: s.timestamp.to_rfc3339(),
                y: ChartValue::Number(s.value),
            })
            .collect();

        let light = series
            .light_series
            .iter()
            .map(|e| ChartPoint {
                x: event_x(e.date, e.time),
                y: ChartValue::Status(e.status.as_str()),
            })
            .collect();

        let feed = series
            .feed_series
            .iter()
            .map(|e| ChartPoint {
                x: event_x(e.date, e.time),
                y: ChartValue::Status("ON"),
            })
            .collect();

        ChartData {
            title: format!("{} on {}", p.label(), series.resolved_date),
            date: series.resolved_date,
            parameter: p,
            unit: p.unit(),
            axis_max: p.axis_max(),
            sensor,
            light,
            feed,
        }
    }
}

fn event_x(date: NaiveDate, time: chrono::NaiveTime) -> String {
    format!("{}T{}", date.format("%Y-%m-%d"), time.format("%H:%M:%S"))
}
