use std::time::Duration;

use anyhow::{Context, Result};
use aquarium_report::config::ReportConfig;
use aquarium_report::fetch::{BasicClient, HttpClient, WithHeaders, fetch_bytes};
use aquarium_report::parser::parse_report;
use aquarium_report::report::ReportPayload;
use async_trait::async_trait;
use tracing::info;

use crate::services::report_api::ReportApi;

/// Client for the aquarium backend's `report/` endpoint.
pub struct BackendClient<C> {
    http: C,
    report_url: String,
}

impl BackendClient<WithHeaders<BasicClient>> {
    /// Builds a client from config, with its timeout and extra headers.
    pub fn from_config(config: &ReportConfig) -> Result<Self> {
        Self::with_url(config, config.report_url())
    }

    /// Same as [`BackendClient::from_config`] but hitting an explicit URL.
    pub fn with_url(config: &ReportConfig, report_url: String) -> Result<Self> {
        let basic = BasicClient::new(Duration::from_secs(config.timeout_secs))?;
        let http = WithHeaders::new(basic, &config.headers)?;
        Ok(Self::new(http, report_url))
    }
}

impl<C: HttpClient> BackendClient<C> {
    pub fn new(http: C, report_url: String) -> Self {
        Self { http, report_url }
    }
}

#[async_trait]
impl<C: HttpClient> ReportApi for BackendClient<C> {
    #[tracing::instrument(skip(self), fields(url = %self.report_url))]
    async fn fetch_report(&self) -> Result<ReportPayload> {
        let bytes = fetch_bytes(&self.http, &self.report_url)
            .await
            .with_context(|| format!("Failed to load report from {}", self.report_url))?;

        let report = parse_report(&bytes)?;
        info!(
            sensor = report.sensor.len(),
            light = report.light.len(),
            feed = report.feed.len(),
            "Report fetched"
        );
        Ok(report)
    }
}
