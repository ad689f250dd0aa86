use std::time::Instant;

use reqwest::Url;
use tracing::debug;

use crate::config::HarnessConfig;
use crate::error::HarnessError;

use super::request::RequestInput;
use super::response::HttpResponse;

/// HTTP client bound to one service base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &HarnessConfig) -> Result<Self, HarnessError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| HarnessError::InvalidUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, request: &RequestInput) -> Result<Url, HarnessError> {
        let raw = format!("{}{}", self.base_url, request.endpoint.path());
        Url::parse(&raw).map_err(|e| HarnessError::InvalidUrl {
            url: raw,
            reason: e.to_string(),
        })
    }

    /// One request, one response. Non-2xx statuses are returned, not raised.
    pub async fn send(&self, request: RequestInput) -> Result<HttpResponse, HarnessError> {
        let url = self.url_for(&request)?;
        self.send_to(url, request).await
    }

    /// Like [`ApiClient::send`] with the URL already resolved by [`ApiClient::url_for`].
    pub async fn send_to(
        &self,
        url: Url,
        request: RequestInput,
    ) -> Result<HttpResponse, HarnessError> {
        let mut req_builder = self.http.request(request.method.into(), url.clone());
        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let started = Instant::now();
        let response = req_builder.send().await?;
        let elapsed = started.elapsed().as_millis();

        let status = response.status();
        let bytes = response.bytes().await?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        debug!(
            method = %request.method,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = elapsed as u64,
            "exchange complete"
        );

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            duration_ms: elapsed,
            body,
        })
    }
}
