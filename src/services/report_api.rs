//! Trait for loading the report history from its source.

use anyhow::Result;
use aquarium_report::report::ReportPayload;

/// Abstraction over a report history provider (e.g., the aquarium backend).
#[async_trait::async_trait]
pub trait ReportApi {
    /// Returns the full sensor, light and feed history for the account.
    async fn fetch_report(&self) -> Result<ReportPayload>;
}
