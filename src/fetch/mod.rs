//! HTTP plumbing for talking to the backend.

mod basic;
mod client;
mod headers;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use headers::WithHeaders;

use anyhow::Result;
use tracing::debug;

/// GETs `url` and returns the body. Non-2xx responses are errors.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    let bytes = resp.bytes().await?;
    debug!(url, bytes = bytes.len(), "Fetched response body");

    Ok(bytes.to_vec())
}
