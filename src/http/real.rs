//! Blocking reqwest-backed HTTP client

use super::{Header, HttpClient, HttpResponse};
use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder};
use std::time::Duration;
use tracing::debug;

/// HTTP client used for all real outbound calls.
///
/// The GitHub API rejects requests without a `User-Agent`, so one is always set.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("{}/{}", crate::NAME, crate::VERSION))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    fn send(&self, url: &str, request: RequestBuilder, headers: &[Header]) -> Result<HttpResponse> {
        let request = headers
            .iter()
            .fold(request, |request, (name, value)| request.header(*name, value));

        let response = request
            .send()
            .with_context(|| format!("Request to {} failed (check network connectivity)", url))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .with_context(|| format!("Failed to read response body from {}", url))?;

        debug!(url, status, bytes = body.len(), "HTTP response");
        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get(&self, url: &str, headers: &[Header]) -> Result<HttpResponse> {
        self.send(url, self.client.get(url), headers)
    }

    fn post_json(
        &self,
        url: &str,
        headers: &[Header],
        body: &serde_json::Value,
    ) -> Result<HttpResponse> {
        self.send(url, self.client.post(url).json(body), headers)
    }
}
