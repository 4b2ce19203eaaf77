//! HttpClient trait definition

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// A request header as a name/value pair
pub type Header = (&'static str, String);

/// A fully-read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn not_found() -> Self {
        Self::new(404, "Not Found")
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).context("Response body is not valid JSON")
    }
}

/// Abstraction over outbound HTTP calls.
///
/// Implementations return `Ok` for every response the server produced,
/// including non-success statuses; `Err` is reserved for transport failures.
pub trait HttpClient: Send + Sync {
    /// Issue a GET request
    fn get(&self, url: &str, headers: &[Header]) -> Result<HttpResponse>;

    /// Issue a POST request with a JSON body
    fn post_json(
        &self,
        url: &str,
        headers: &[Header],
        body: &serde_json::Value,
    ) -> Result<HttpResponse>;
}
