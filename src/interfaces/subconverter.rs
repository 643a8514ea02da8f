use log::{info, warn};

use crate::error::ConvertError;
use crate::generator::exports::clash::proxy_to_clash;
use crate::generator::yaml::clash_output::ClashYamlOutput;
use crate::parser::subparser::parse_subscription;
use crate::settings::{Settings, DEFAULT_TEMPLATE_PATH};
use crate::utils::SubscriptionFetcher;

/// Configuration for one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubconverterConfig {
    /// Subscription URL
    pub url: String,
    /// Clash template merged with the generated proxies
    pub template_path: String,
}

impl From<&Settings> for SubconverterConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            url: settings.url.clone(),
            template_path: settings.template_path.clone(),
        }
    }
}

/// Builder for SubconverterConfig
#[derive(Debug, Clone)]
pub struct SubconverterConfigBuilder {
    config: SubconverterConfig,
}

impl Default for SubconverterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SubconverterConfigBuilder {
    /// Create a new default builder
    pub fn new() -> Self {
        SubconverterConfigBuilder {
            config: SubconverterConfig {
                url: String::new(),
                template_path: DEFAULT_TEMPLATE_PATH.to_string(),
            },
        }
    }

    /// Set the subscription URL
    pub fn url(mut self, url: &str) -> Self {
        self.config.url = url.to_string();
        self
    }

    /// Set the template path
    pub fn template_path(mut self, path: &str) -> Self {
        self.config.template_path = path.to_string();
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<SubconverterConfig, String> {
        if self.config.url.trim().is_empty() {
            return Err("No subscription URL provided".to_string());
        }
        Ok(self.config)
    }
}

/// Result of a conversion
#[derive(Debug, Clone)]
pub struct SubconverterResult {
    /// Serialized Clash YAML
    pub content: String,
    /// Number of proxies in the output
    pub node_count: usize,
    /// vmess links that were dropped
    pub skipped: usize,
}

/// Build the Clash document for the configured subscription.
///
/// Fetch, outer decode, template and empty-result failures end the
/// conversion; bad individual links are skipped.
pub async fn convert_document<F: SubscriptionFetcher>(
    config: &SubconverterConfig,
    fetcher: &F,
) -> Result<(ClashYamlOutput, usize), ConvertError> {
    info!("Fetching subscription content from: {}", config.url);
    let body = fetcher.fetch(&config.url).await?;

    let outcome = parse_subscription(&body)?;
    if outcome.skipped > 0 {
        warn!("Skipped {} invalid vmess links", outcome.skipped);
    }
    if outcome.proxies.is_empty() {
        return Err(ConvertError::EmptyResult);
    }
    info!("Successfully converted {} nodes.", outcome.proxies.len());

    let document = proxy_to_clash(&config.template_path, outcome.proxies, &outcome.names).await?;
    Ok((document, outcome.skipped))
}

/// Run a full conversion and serialize the result
pub async fn subconverter<F: SubscriptionFetcher>(
    config: &SubconverterConfig,
    fetcher: &F,
) -> Result<SubconverterResult, ConvertError> {
    let (document, skipped) = convert_document(config, fetcher).await?;
    let content = document.to_yaml()?;
    Ok(SubconverterResult {
        content,
        node_count: document.proxies.len(),
        skipped,
    })
}
