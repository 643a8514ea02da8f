use std::future::Future;
use std::time::Duration;

use log::debug;
use reqwest::Client;

use crate::error::ConvertError;

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 15;

const USER_AGENT: &str = concat!("vmess2clash/", env!("CARGO_PKG_VERSION"));

/// Source of raw subscription bodies.
///
/// The converter only depends on this trait so that the network can be
/// swapped out, e.g. for a fixed body in tests.
pub trait SubscriptionFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, ConvertError>>;
}

/// Fetches subscriptions over HTTP(S) with reqwest.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl SubscriptionFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ConvertError> {
        web_get_async(url, self.timeout).await
    }
}

/// Makes a GET request to the specified URL
///
/// # Arguments
/// * `url` - The URL to request
/// * `timeout` - Whole-request timeout
///
/// # Returns
/// * `Ok(String)` - The response body as a string
/// * `Err(ConvertError::FetchError)` - If the request failed or the status is not a success
pub async fn web_get_async(url: &str, timeout: Duration) -> Result<String, ConvertError> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ConvertError::FetchError(format!("failed to build HTTP client: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ConvertError::FetchError(format!("failed to send request: {}", e)))?;

    let status = response.status();
    debug!("GET {} -> {}", url, status);
    if !status.is_success() {
        return Err(ConvertError::FetchError(format!("HTTP error: {}", status)));
    }

    response
        .text()
        .await
        .map_err(|e| ConvertError::FetchError(format!("failed to read response body: {}", e)))
}
