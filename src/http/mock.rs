use super::{Header, HttpClient, HttpResponse};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// A request observed by [`MockHttpClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

/// In-memory HTTP client keyed by URL.
///
/// Unregistered URLs answer 404. URLs registered with [`MockHttpClient::fail`]
/// produce a transport error.
#[derive(Default)]
pub struct MockHttpClient {
    responses: RwLock<HashMap<String, HttpResponse>>,
    failures: RwLock<HashMap<String, String>>,
    requests: RwLock<Vec<RecordedRequest>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_response(&self, url: impl Into<String>, response: HttpResponse) {
        self.responses.write().unwrap().insert(url.into(), response);
    }

    pub fn add_json(&self, url: impl Into<String>, body: serde_json::Value) {
        self.add_response(url, HttpResponse::ok(body.to_string()));
    }

    pub fn add_text(&self, url: impl Into<String>, body: &str) {
        self.add_response(url, HttpResponse::ok(body));
    }

    pub fn fail(&self, url: impl Into<String>, message: &str) {
        self.failures
            .write()
            .unwrap()
            .insert(url.into(), message.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().unwrap().clone()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }

    fn respond(
        &self,
        method: &'static str,
        url: &str,
        headers: &[Header],
        body: Option<&serde_json::Value>,
    ) -> Result<HttpResponse> {
        self.requests.write().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
            body: body.cloned(),
        });

        if let Some(message) = self.failures.read().unwrap().get(url) {
            return Err(anyhow!("{}", message));
        }

        Ok(self
            .responses
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(HttpResponse::not_found))
    }
}

impl HttpClient for MockHttpClient {
    fn get(&self, url: &str, headers: &[Header]) -> Result<HttpResponse> {
        self.respond("GET", url, headers, None)
    }

    fn post_json(
        &self,
        url: &str,
        headers: &[Header],
        body: &serde_json::Value,
    ) -> Result<HttpResponse> {
        self.respond("POST", url, headers, Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_url_is_not_found() {
        let http = MockHttpClient::new();
        let response = http.get("https://example.com/missing", &[]).unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(http.requested_urls(), vec!["https://example.com/missing"]);
    }

    #[test]
    fn test_registered_failure() {
        let http = MockHttpClient::new();
        http.fail("https://example.com/down", "connection refused");
        let err = http.get("https://example.com/down", &[]).unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_records_post_body() {
        let http = MockHttpClient::new();
        let body = serde_json::json!({"query": "x"});
        http.post_json("https://example.com/search", &[("x-api-key", "k".to_string())], &body)
            .unwrap();

        let requests = http.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].body.as_ref(), Some(&body));
        assert_eq!(requests[0].headers[0], ("x-api-key".to_string(), "k".to_string()));
    }
}
