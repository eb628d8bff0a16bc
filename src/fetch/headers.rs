use std::collections::BTreeMap;

use crate::fetch::client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// An [`HttpClient`] wrapper that adds a fixed set of headers to every request.
///
/// Used for gateway quirks such as `ngrok-skip-browser-warning`, which the
/// backend tunnel needs on every call.
pub struct WithHeaders<C> {
    inner: C,
    headers: HeaderMap,
}

impl<C> WithHeaders<C> {
    /// Validates `headers` up front so a bad config fails before any request.
    pub fn new(inner: C, headers: &BTreeMap<String, String>) -> Result<Self> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .with_context(|| format!("Invalid header name '{name}'"))?;
            let value = HeaderValue::from_str(value)
                .with_context(|| format!("Invalid value for header '{name}'"))?;
            map.insert(name, value);
        }
        Ok(Self {
            inner,
            headers: map,
        })
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for WithHeaders<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        for (name, value) in &self.headers {
            req.headers_mut().insert(name.clone(), value.clone());
        }
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fetch_bytes;
    use std::sync::Mutex;

    /// Records the headers of the last request and answers with a fixed body.
    struct Recorder {
        seen: Mutex<Option<HeaderMap>>,
        status: u16,
        body: &'static str,
    }

    impl Recorder {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                seen: Mutex::new(None),
                status,
                body,
            }
        }
    }

    #[async_trait]
    impl HttpClient for Recorder {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            *self.seen.lock().unwrap() = Some(req.headers().clone());
            let resp = http::Response::builder()
                .status(self.status)
                .body(self.body.as_bytes().to_vec())
                .unwrap();
            Ok(reqwest::Response::from(resp))
        }
    }

    fn headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_rejects_invalid_header_name() {
        let result = WithHeaders::new(Recorder::new(200, ""), &headers(&[("bad header", "1")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_invalid_header_value() {
        let result =
            WithHeaders::new(Recorder::new(200, ""), &headers(&[("x-key", "line\nbreak")]));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_injects_headers() {
        let client = WithHeaders::new(
            Recorder::new(200, "{}"),
            &headers(&[("ngrok-skip-browser-warning", "69420")]),
        )
        .unwrap();

        let body = fetch_bytes(&client, "http://127.0.0.1:8000/project/report/")
            .await
            .unwrap();
        assert_eq!(body, b"{}");

        let seen = client.inner.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen["ngrok-skip-browser-warning"], "69420");
    }

    #[tokio::test]
    async fn test_fetch_bytes_fails_on_server_error() {
        let client = Recorder::new(500, r#"{"message": "Error occurred"}"#);
        let result = fetch_bytes(&client, "http://127.0.0.1:8000/project/report/").await;
        assert!(result.is_err());
    }
}
