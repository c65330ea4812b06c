//! Rackforge REST client.
//!
//! A thin HTTP wrapper shared by all endpoint modules: bearer-token auth,
//! a request timeout, status triage and typed JSON decoding. There is
//! deliberately no retry or backoff; transient failures surface to the
//! caller unchanged.

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

use crate::error::{ApiError, Result};

/// Default Rackforge API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.rackforge.io/v1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Page size used when following pagination to exhaustion.
pub(crate) const DEFAULT_PER_PAGE: u32 = 50;

/// Rackforge API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// HTTP client.
    client: Client,
    /// API endpoint without trailing slash.
    endpoint: String,
    /// Bearer token.
    token: String,
}

/// Error body returned by the API on failures.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl ApiClient {
    /// Creates a new client against the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_timeout(token, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_timeout(token: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: String::from(DEFAULT_ENDPOINT),
            token: token.to_string(),
        })
    }

    /// Overrides the API endpoint (trailing slashes are stripped).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let mut endpoint = endpoint.into();
        while endpoint.ends_with('/') {
            endpoint.pop();
        }
        self.endpoint = endpoint;
        self
    }

    /// Performs a GET request and decodes the JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let builder = self.client.get(self.url(path)).query(query);
        let response = self.send(builder, path).await?;
        Self::decode(response).await
    }

    /// Performs a POST request with a JSON body and decodes the response.
    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let builder = self.client.post(self.url(path)).json(body);
        let response = self.send(builder, path).await?;
        Self::decode(response).await
    }

    /// Performs a bodyless POST request (power actions) and decodes the response.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.client.post(self.url(path));
        let response = self.send(builder, path).await?;
        Self::decode(response).await
    }

    /// Performs a PUT request with a JSON body and decodes the response.
    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let builder = self.client.put(self.url(path)).json(body);
        let response = self.send(builder, path).await?;
        Self::decode(response).await
    }

    /// Performs a DELETE request, discarding any response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let builder = self.client.delete(self.url(path));
        self.send(builder, path).await?;
        Ok(())
    }

    /// Fetches one page of a collection endpoint.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<T>> {
        self.get_json(
            path,
            &[
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ],
        )
        .await
    }

    /// Follows page-number pagination to exhaustion.
    pub(crate) async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let chunk: Vec<T> = self.get_page(path, page, DEFAULT_PER_PAGE).await?;
            let len = chunk.len();
            items.extend(chunk);

            if len < DEFAULT_PER_PAGE as usize {
                break;
            }
            page += 1;
        }

        debug!("Fetched {} items from {path}", items.len());
        Ok(items)
    }

    /// Builds the full request URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint)
    }

    /// Sends a request and triages the response status.
    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<reqwest::Response> {
        trace!("Request: {path}");

        let response = builder
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Request failed: {e}")))?;

        let status = response.status();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ApiError::AuthenticationFailed {
                message: String::from("Invalid or expired API token"),
            }
            .into());
        }

        if status.as_u16() == 404 {
            return Err(ApiError::NotFound {
                path: path.to_string(),
            }
            .into());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map_or(body, |parsed| parsed.message);
            return Err(ApiError::request_failed(status.as_u16(), message).into());
        }

        Ok(response)
    }

    /// Decodes a successful response body.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| ApiError::invalid_response(format!("Failed to parse response: {e}")).into())
    }
}
