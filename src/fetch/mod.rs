//! Network fetch facility.
//!
//! [`Fetcher`] wraps a pooled `reqwest::Client`. [`Fetcher::fetch_json`]
//! treats any non-2xx status as a failure and decodes successful bodies as
//! JSON; the guarded wrapper lives in [`crate::guard::fetch`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use xguard_types::Failure;

use crate::config::FetchConfig;
use crate::error::GuardError;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
}

/// Per-request options
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
    /// Overrides the client-wide timeout for this request
    pub timeout_secs: Option<u64>,
}

impl RequestOptions {
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Pooled HTTP client for guarded fetches
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, GuardError> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder
            .build()
            .map_err(|e| GuardError::HttpClientError(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Send the request and decode a successful body as JSON.
    ///
    /// Transport and body-read failures are type failures, a non-2xx status
    /// is an HTTP status failure (the body is not read), and an undecodable
    /// body is a syntax failure.
    pub async fn fetch_json(&self, url: &str, options: &RequestOptions) -> Result<Value, Failure> {
        let mut request = match options.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
            HttpMethod::Patch => self.client.patch(url),
            HttpMethod::Head => self.client.head(url),
        };

        for (key, value) in &options.headers {
            request = request.header(key, value);
        }
        if let Some(body) = &options.body {
            request = request.body(body.clone());
        }
        if let Some(secs) = options.timeout_secs {
            request = request.timeout(std::time::Duration::from_secs(secs));
        }

        let response = request
            .send()
            .await
            .map_err(|e| Failure::type_error(format!("Failed to fetch: {}", e)).with_input(url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Failure::http_status(status.as_u16()).with_input(url));
        }

        let body = response.text().await.map_err(|e| {
            Failure::type_error(format!("Failed to read response body: {}", e)).with_input(url)
        })?;

        serde_json::from_str(&body).map_err(|e| Failure::from(e).with_input(url))
    }
}
