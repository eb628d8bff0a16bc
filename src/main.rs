//! CLI entry point for the aquarium report tool.
//!
//! Loads the sensor, light and feed history from the backend (or a saved
//! response), pages through the rolling 7-day window, and emits chart-ready
//! series for one day and parameter.

mod infra;
mod services;

use crate::infra::backend::client::BackendClient;
use crate::services::report_api::ReportApi;
use anyhow::{Context, Result};
use aquarium_report::{
    config::{ReportConfig, parse_timezone},
    output::{print_json, print_pretty, write_csv, write_json},
    parser::parse_report,
    report::{ChartData, Parameter, ReportPayload, build_report_series, group_by_date, recent_days},
};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "aquarium_report")]
#[command(about = "Chart-ready reports from aquarium sensor history", long_about = None)]
struct Cli {
    /// JSON config file (defaults to REPORT_* environment variables)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Reference timezone for day and hour boundaries (e.g. "Asia/Bangkok")
    #[arg(long, global = true)]
    timezone: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the chart series for one day of the report window
    Report {
        /// Saved report JSON or URL to fetch (defaults to the configured backend)
        #[arg(short, long, value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Day of the window: 1 = today, 7 = six days ago
        #[arg(short, long, default_value_t = 1)]
        day: usize,

        /// Sensor parameter: temp, ph, tds or waterLv
        #[arg(short, long, default_value = "temp")]
        param: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// File to write to (csv defaults to report.csv; json logs when unset)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List the days of the report window with their record counts
    Days {
        /// Saved report JSON or URL to fetch (defaults to the configured backend)
        #[arg(short, long, value_name = "FILE_OR_URL")]
        source: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
    Pretty,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/aquarium_report.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("aquarium_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::from_env()?,
    };
    if let Some(name) = &cli.timezone {
        config.timezone = parse_timezone(name)?;
    }
    info!(timezone = %config.timezone, base_url = %config.base_url, "Configuration loaded");

    match cli.command {
        Commands::Report {
            source,
            day,
            param,
            format,
            output,
        } => {
            let parameter: Parameter = param.parse()?;
            let payload = load_report(source.as_deref(), &config).await?;

            let series =
                build_report_series(&payload, day, parameter, config.timezone, Utc::now())?;
            if series.is_empty() {
                let date = series.resolved_date;
                warn!(date = %date, "No data available for {}", date);
            }

            let chart = ChartData::from_series(&series);
            match (format, output) {
                (Format::Json, Some(path)) => write_json(&path, &chart)?,
                (Format::Json, None) => print_json(&chart)?,
                (Format::Csv, path) => {
                    let path = path.unwrap_or_else(|| "report.csv".to_string());
                    write_csv(&path, &chart)?;
                    info!(path = %path, "Report written");
                }
                (Format::Pretty, _) => print_pretty(&series),
            }
        }
        Commands::Days { source } => {
            let payload = load_report(source.as_deref(), &config).await?;
            list_days(&payload, &config);
        }
    }

    Ok(())
}

/// Loads the report from a local file, an explicit URL, or the configured backend.
#[tracing::instrument(skip(config))]
async fn load_report(source: Option<&str>, config: &ReportConfig) -> Result<ReportPayload> {
    match source {
        Some(url) if url.starts_with("http") => {
            BackendClient::with_url(config, url.to_string())?
                .fetch_report()
                .await
        }
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read report file '{path}'"))?;
            parse_report(&bytes)
        }
        None => BackendClient::from_config(config)?.fetch_report().await,
    }
}

/// Logs each day of the window, today first, with its record counts.
fn list_days(payload: &ReportPayload, config: &ReportConfig) {
    let sensor = group_by_date(payload.sensor.iter());
    let light = group_by_date(payload.light.iter());
    let feed = group_by_date(payload.feed.iter());

    for (i, day) in recent_days(config.timezone, Utc::now()).into_iter().enumerate() {
        info!(
            day = i + 1,
            date = %day,
            sensor = sensor.get(&day).map_or(0, Vec::len),
            light = light.get(&day).map_or(0, Vec::len),
            feed = feed.get(&day).map_or(0, Vec::len),
            "Report day"
        );
    }
}
