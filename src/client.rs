//! The Semantic Scholar Graph API client.

use crate::error::{Result, S2Error};
use reqwest::Client;
use std::time::Duration;

/// Base URL of the Semantic Scholar Graph API.
pub const DEFAULT_BASE_URL: &str = "https://api.semanticscholar.org/graph/v1";

/// Async client for the Semantic Scholar Graph API.
///
/// Works with or without an API key; keyless requests are accepted by the
/// service but hit a much lower rate-limit allowance.
///
/// # Example
///
/// ```no_run
/// # async fn example() {
/// let client = s2doi::S2Client::from_env();
/// let resolution = client.resolve_corpus_id("2157025439").await;
/// if let Some(doi) = resolution.doi() {
///     println!("{doi}");
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct S2Client {
    pub(crate) http: Client,
    pub(crate) api_key: Option<String>,
    pub(crate) base_url: String,
}

impl S2Client {
    /// Create a new client with an optional API key.
    pub fn new(api_key: Option<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client from the `S2_API_KEY` (or `SEMANTIC_SCHOLAR_API_KEY`)
    /// environment variable. A missing or empty variable yields a keyless
    /// client, which is a valid (if heavily throttled) configuration.
    pub fn from_env() -> Self {
        let key = std::env::var("S2_API_KEY")
            .or_else(|_| std::env::var("SEMANTIC_SCHOLAR_API_KEY"))
            .ok()
            .filter(|k| !k.is_empty());
        Self::new(key)
    }

    /// Override the base URL (useful for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Whether this client carries an API key.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Make a GET request to the Semantic Scholar API, attaching the
    /// `x-api-key` header when a key is present.
    pub(crate) async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .get(&url)
            .header("User-Agent", "s2doi/0.1.0")
            .query(params);

        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        handle_response(request.send().await?).await
    }
}

/// Handle the HTTP response, mapping status codes to errors.
async fn handle_response(response: reqwest::Response) -> Result<String> {
    let status = response.status().as_u16();

    match status {
        200..=299 => Ok(response.text().await?),
        404 => Err(S2Error::NotFound("Paper not found".to_string())),
        429 => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);
            Err(S2Error::RateLimited { retry_after })
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(S2Error::Api {
                status,
                message: body,
            })
        }
    }
}
