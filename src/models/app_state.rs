use crate::interfaces::SubconverterConfig;
use crate::settings::Settings;
use crate::utils::HttpFetcher;

/// Application state structure for the web server
///
/// Read-only after construction; every request builds its own pipeline from it.
#[derive(Debug)]
pub struct AppState<F = HttpFetcher> {
    /// Process settings
    pub config: Settings,

    /// Where subscription bodies come from
    pub fetcher: F,
}

impl AppState<HttpFetcher> {
    /// Create a new AppState fetching over HTTP
    pub fn new(config: Settings) -> Self {
        let fetcher = HttpFetcher::new(config.fetch_timeout);
        Self { config, fetcher }
    }
}

impl<F> AppState<F> {
    /// Create an AppState with a custom fetcher
    pub fn with_fetcher(config: Settings, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    /// Conversion configuration for a request
    pub fn subconverter_config(&self) -> SubconverterConfig {
        SubconverterConfig::from(&self.config)
    }
}
