//! `CatalogClient` - movie catalog API client implementation.

use reqwest::Client;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use super::api::LocalCatalogApi;
use super::endpoint::resolve_endpoint;
use super::error::{CatalogError, Result};
use super::request::RequestDescriptor;
use super::shape::shape_results;
use super::types::ResultPage;

/// Default base URL for the movie catalog API.
const DEFAULT_BASE_URL: &str = "http://matuan.online:2422/api/";

/// Movie catalog API client.
///
/// Holds its configuration as an explicitly constructed value; there is
/// no process-wide state. Each call fetches and shapes from scratch,
/// nothing is cached or retried.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests. Must end with a trailing slash so
    /// relative endpoint paths join under it.
    base_url: Url,
}

/// Builder for `CatalogClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
}

impl CatalogClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<CatalogClient> {
        let user_agent = self
            .user_agent
            .ok_or_else(|| CatalogError::Configuration(String::from("user_agent is required")))?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|err| CatalogError::Configuration(format!("invalid base URL: {err}")))?,
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .map_err(|err| {
                CatalogError::Configuration(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(CatalogClient {
            http_client,
            base_url,
        })
    }
}

impl CatalogClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Runs the pipeline stages for one request string.
    async fn run(&self, request: &str) -> Result<ResultPage> {
        let descriptor = RequestDescriptor::parse(request);
        let endpoint = resolve_endpoint(&descriptor)?;
        let data = self.get_json(&endpoint).await?;
        shape_results(data, &descriptor)
    }

    /// Sends a GET request for the given relative path and decodes the
    /// JSON body.
    #[instrument(skip_all)]
    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.base_url.join(path).map_err(|err| {
            CatalogError::InvalidRequest(format!("failed to join URL path {path}: {err}"))
        })?;

        tracing::debug!(url = %url, "catalog API request");

        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UpstreamHttp {
                status,
                endpoint: String::from(path),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| {
            CatalogError::UpstreamData(format!("failed to decode JSON response from {path}: {err}"))
        })
    }
}

impl LocalCatalogApi for CatalogClient {
    #[instrument(skip_all)]
    async fn execute(&self, request: &str) -> Result<ResultPage> {
        let result = self.run(request).await;
        if let Err(err) = &result {
            tracing::warn!(request = request, "catalog request failed: {err}");
        }
        result
    }
}
