use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Websocket transport options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WsOpts {
    pub path: String,
    pub headers: BTreeMap<String, String>,
}

/// A vmess proxy as written into the `proxies` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashProxy {
    pub name: String,
    #[serde(rename = "type")]
    pub proxy_type: String,
    pub server: String,
    pub port: u16,
    pub uuid: String,
    #[serde(rename = "alterId")]
    pub alter_id: i64,
    pub cipher: String,
    pub tls: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub network: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_opts: Option<WsOpts>,
    pub skip_cert_verify: bool,
}

/// Proxy group in the output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClashProxyGroup {
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: String,
    pub proxies: Vec<String>,
}

/// Rule provider definition, passed through from the template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleProvider {
    #[serde(rename = "type")]
    pub provider_type: String,
    pub behavior: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
    /// Keys this crate does not model (format, proxy, ...)
    #[serde(flatten)]
    pub extra_options: BTreeMap<String, serde_yaml::Value>,
}

/// Represents a complete Clash configuration output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashYamlOutput {
    pub port: u16,
    pub socks_port: u16,
    pub allow_lan: bool,
    pub mode: String,
    pub log_level: String,
    pub external_controller: String,
    pub proxies: Vec<ClashProxy>,
    pub proxy_groups: Vec<ClashProxyGroup>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rule_providers: BTreeMap<String, RuleProvider>,
    pub rules: Vec<String>,
}

impl ClashYamlOutput {
    /// Serialize the document to YAML text
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
