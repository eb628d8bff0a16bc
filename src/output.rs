//! Output formatting and persistence for report series.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::report::{ChartData, ChartPoint, ChartValue, ReportSeries};
use csv::WriterBuilder;
use std::fs::File;

/// Logs a report series using Rust's debug pretty-print format.
pub fn print_pretty(series: &ReportSeries) {
    debug!("{:#?}", series);
}

/// Logs chart data as pretty-printed JSON.
pub fn print_json(chart: &ChartData) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(chart)?);
    Ok(())
}

/// Writes chart data as pretty-printed JSON to `path`, replacing the file.
pub fn write_json(path: &str, chart: &ChartData) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create '{path}'"))?;
    serde_json::to_writer_pretty(file, chart)?;
    debug!(path, "Wrote chart JSON");
    Ok(())
}

#[derive(Serialize)]
struct CsvRow<'a> {
    series: &'static str,
    x: &'a str,
    y: String,
}

/// Writes every chart point as a `series,x,y` row to `path`, replacing the file.
pub fn write_csv(path: &str, chart: &ChartData) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create '{path}'"))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    let datasets: [(&'static str, &[ChartPoint]); 3] = [
        ("sensor", chart.sensor.as_slice()),
        ("light", chart.light.as_slice()),
        ("feed", chart.feed.as_slice()),
    ];

    let mut rows = 0usize;
    for (series, points) in datasets {
        for point in points {
            writer.serialize(CsvRow {
                series,
                x: &point.x,
                y: match &point.y {
                    ChartValue::Number(v) => v.to_string(),
                    ChartValue::Status(s) => s.to_string(),
                },
            })?;
            rows += 1;
        }
    }
    writer.flush()?;

    debug!(path, rows, "Wrote chart CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Parameter;
    use chrono::NaiveDate;
    use std::env;
    use std::fs;
    use std::path::Path;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn chart() -> ChartData {
        ChartData {
            title: "Temperature on 2024-06-01".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            parameter: Parameter::Temp,
            unit: "°C",
            axis_max: 125.0,
            sensor: vec![ChartPoint {
                x: "2024-06-01T09:00:00+07:00".to_string(),
                y: ChartValue::Number(25.5),
            }],
            light: vec![
                ChartPoint {
                    x: "2024-06-01T07:00:00".to_string(),
                    y: ChartValue::Status("ON"),
                },
                ChartPoint {
                    x: "2024-06-01T19:00:00".to_string(),
                    y: ChartValue::Status("OFF"),
                },
            ],
            feed: vec![],
        }
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&chart()).unwrap();
    }

    #[test]
    fn test_print_pretty_empty_series_does_not_panic() {
        print_pretty(&ReportSeries {
            resolved_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            parameter: Parameter::Temp,
            sensor_series: vec![],
            light_series: vec![],
            feed_series: vec![],
        });
    }

    #[test]
    fn test_write_csv_rows() {
        let path = temp_path("aquarium_report_test_rows.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &chart()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "series,x,y",
                "sensor,2024-06-01T09:00:00+07:00,25.5",
                "light,2024-06-01T07:00:00,ON",
                "light,2024-06-01T19:00:00,OFF",
            ]
        );

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_csv_replaces_existing_file() {
        let path = temp_path("aquarium_report_test_replace.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &chart()).unwrap();
        write_csv(&path, &chart()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 4);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_json_creates_file() {
        let path = temp_path("aquarium_report_test_chart.json");
        let _ = fs::remove_file(&path);

        write_json(&path, &chart()).unwrap();

        assert!(Path::new(&path).exists());
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["light"][1]["y"], "OFF");
        assert_eq!(value["sensor"][0]["y"], 25.5);

        fs::remove_file(&path).unwrap();
    }
}
