use std::collections::BTreeMap;

use log::{info, warn};
use serde::{de, Deserialize, Deserializer};

use crate::error::ConvertError;
use crate::generator::yaml::clash_output::{
    ClashProxy, ClashProxyGroup, ClashYamlOutput, RuleProvider,
};
use crate::models::ProxyGroupConfigs;
use crate::utils::file_get_async;

/// Base Clash configuration read from the template file.
///
/// Everything except the `proxies` section comes from here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClashTemplate {
    pub port: u16,
    pub socks_port: u16,
    #[serde(deserialize_with = "yaml11_bool")]
    pub allow_lan: bool,
    pub mode: String,
    pub log_level: String,
    pub external_controller: String,
    pub rule_providers: BTreeMap<String, RuleProvider>,
    pub rules: Vec<String>,
    pub proxy_groups: ProxyGroupConfigs,
}

// Clash templates in the wild still use YAML 1.1 booleans (yes/no/on/off)
fn yaml11_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(false),
        serde_yaml::Value::Bool(b) => Ok(b),
        serde_yaml::Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "y" | "yes" | "on" | "true" => Ok(true),
            "n" | "no" | "off" | "false" => Ok(false),
            _ => Err(de::Error::custom(format!("expected a boolean, found \"{}\"", s))),
        },
        other => Err(de::Error::custom(format!(
            "expected a boolean, found {:?}",
            other
        ))),
    }
}

/// Parse template text. `path` is only used in the error message.
pub fn parse_template(content: &str, path: &str) -> Result<ClashTemplate, ConvertError> {
    // An empty document carries no settings at all
    if content.trim().is_empty() {
        return Ok(ClashTemplate::default());
    }
    serde_yaml::from_str(content).map_err(|source| ConvertError::TemplateParseError {
        path: path.to_string(),
        source,
    })
}

/// Load the template at `path`.
///
/// # Returns
/// * `Ok(None)` - the file is missing or unreadable; callers use the built-in default
/// * `Err(ConvertError::TemplateParseError)` - the file exists but is malformed
pub async fn load_template(path: &str) -> Result<Option<ClashTemplate>, ConvertError> {
    match file_get_async(path).await {
        Ok(content) => parse_template(&content, path).map(Some),
        Err(e) => {
            warn!(
                "Error reading template file '{}': {}, using built-in defaults",
                path, e
            );
            Ok(None)
        }
    }
}

/// Merge generated proxies into a template
pub fn merge_template(
    template: ClashTemplate,
    proxies: Vec<ClashProxy>,
    proxy_names: &[String],
) -> ClashYamlOutput {
    let proxy_groups = template
        .proxy_groups
        .iter()
        .map(|group| ClashProxyGroup {
            name: group.name.clone(),
            group_type: group.group_type.clone(),
            proxies: group.proxies.resolve(proxy_names),
        })
        .collect();

    ClashYamlOutput {
        port: template.port,
        socks_port: template.socks_port,
        allow_lan: template.allow_lan,
        mode: template.mode,
        log_level: template.log_level,
        external_controller: template.external_controller,
        proxies,
        proxy_groups,
        rule_providers: template.rule_providers,
        rules: template.rules,
    }
}

/// Built-in configuration used when no template can be read
pub fn default_clash_config(proxies: Vec<ClashProxy>, proxy_names: &[String]) -> ClashYamlOutput {
    let mut members = vec!["DIRECT".to_string(), "REJECT".to_string()];
    members.extend_from_slice(proxy_names);

    ClashYamlOutput {
        port: 7890,
        socks_port: 7891,
        allow_lan: true,
        mode: "Rule".to_string(),
        log_level: "info".to_string(),
        external_controller: "127.0.0.1:9090".to_string(),
        proxies,
        proxy_groups: vec![ClashProxyGroup {
            name: "PROXY".to_string(),
            group_type: "select".to_string(),
            proxies: members,
        }],
        rule_providers: BTreeMap::new(),
        rules: vec!["MATCH,DIRECT".to_string()],
    }
}

/// Convert proxies to a Clash document, using the template at `template_path`
/// when it can be read and the built-in default otherwise.
pub async fn proxy_to_clash(
    template_path: &str,
    proxies: Vec<ClashProxy>,
    proxy_names: &[String],
) -> Result<ClashYamlOutput, ConvertError> {
    match load_template(template_path).await? {
        Some(template) => {
            info!(
                "Merging {} proxies into template '{}'",
                proxies.len(),
                template_path
            );
            Ok(merge_template(template, proxies, proxy_names))
        }
        None => Ok(default_clash_config(proxies, proxy_names)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::exports::proxy_to_clash::VMESS_DEFAULT_CIPHER;
    use std::io::Write;

    const TEMPLATE: &str = r#"
port: 7890
socks-port: 7891
allow-lan: false
mode: rule
log-level: warning
external-controller: 0.0.0.0:9090
rule-providers:
  reject:
    type: http
    behavior: domain
    url: https://example.com/reject.txt
    path: ./ruleset/reject.yaml
    interval: 86400
    format: yaml
proxy-groups:
  - name: Proxy
    type: select
    proxies: ${proxies}
  - name: Auto
    type: url-test
    proxies: ${proxies}
  - name: Final
    type: select
    proxies:
      - Proxy
      - DIRECT
rules:
  - RULE-SET,reject,REJECT
  - GEOIP,CN,DIRECT
  - MATCH,Final
"#;

    fn proxy(name: &str) -> ClashProxy {
        ClashProxy {
            name: name.to_string(),
            proxy_type: "vmess".to_string(),
            server: "example.com".to_string(),
            port: 443,
            uuid: "abc-123".to_string(),
            alter_id: 0,
            cipher: VMESS_DEFAULT_CIPHER.to_string(),
            tls: false,
            network: "tcp".to_string(),
            ws_opts: None,
            skip_cert_verify: true,
        }
    }

    fn names() -> Vec<String> {
        vec!["node-b".to_string(), "node-a".to_string()]
    }

    #[test]
    fn test_merge_template() {
        let template = parse_template(TEMPLATE, "test").unwrap();
        let doc = merge_template(template, vec![proxy("node-b"), proxy("node-a")], &names());

        assert_eq!(doc.port, 7890);
        assert_eq!(doc.socks_port, 7891);
        assert!(!doc.allow_lan);
        assert_eq!(doc.mode, "rule");
        assert_eq!(doc.log_level, "warning");
        assert_eq!(doc.external_controller, "0.0.0.0:9090");
        assert_eq!(doc.proxies.len(), 2);

        assert_eq!(doc.proxy_groups.len(), 3);
        assert_eq!(doc.proxy_groups[0].proxies, names());
        assert_eq!(doc.proxy_groups[1].group_type, "url-test");
        assert_eq!(doc.proxy_groups[1].proxies, names());
        assert_eq!(
            doc.proxy_groups[2].proxies,
            vec!["Proxy".to_string(), "DIRECT".to_string()]
        );

        assert_eq!(
            doc.rules,
            vec!["RULE-SET,reject,REJECT", "GEOIP,CN,DIRECT", "MATCH,Final"]
        );
        let reject = &doc.rule_providers["reject"];
        assert_eq!(reject.provider_type, "http");
        assert_eq!(reject.behavior, "domain");
        assert_eq!(reject.interval, Some(86400));
        assert_eq!(
            reject.extra_options.get("format"),
            Some(&serde_yaml::Value::from("yaml"))
        );
    }

    #[test]
    fn test_rule_providers_round_trip_into_output() {
        let template = parse_template(TEMPLATE, "test").unwrap();
        let doc = merge_template(template, vec![proxy("node-a")], &["node-a".to_string()]);
        let value: serde_yaml::Value = serde_yaml::from_str(&doc.to_yaml().unwrap()).unwrap();
        let reject = &value["rule-providers"]["reject"];
        assert_eq!(
            reject["url"],
            serde_yaml::Value::from("https://example.com/reject.txt")
        );
        assert_eq!(
            reject["path"],
            serde_yaml::Value::from("./ruleset/reject.yaml")
        );
        assert_eq!(reject["format"], serde_yaml::Value::from("yaml"));
    }

    #[test]
    fn test_default_config() {
        let doc = default_clash_config(vec![proxy("node-b"), proxy("node-a")], &names());
        assert_eq!(doc.port, 7890);
        assert_eq!(doc.socks_port, 7891);
        assert!(doc.allow_lan);
        assert_eq!(doc.mode, "Rule");
        assert_eq!(doc.log_level, "info");
        assert_eq!(doc.external_controller, "127.0.0.1:9090");
        assert_eq!(doc.proxy_groups.len(), 1);
        assert_eq!(doc.proxy_groups[0].name, "PROXY");
        assert_eq!(doc.proxy_groups[0].group_type, "select");
        assert_eq!(
            doc.proxy_groups[0].proxies,
            vec!["DIRECT", "REJECT", "node-b", "node-a"]
        );
        assert_eq!(doc.rules, vec!["MATCH,DIRECT"]);
        assert!(doc.rule_providers.is_empty());
    }

    #[test]
    fn test_malformed_template_is_an_error() {
        let err = parse_template("port: [unclosed\n", "bad.yaml").unwrap_err();
        assert!(matches!(err, ConvertError::TemplateParseError { .. }));
        assert!(err.to_string().contains("bad.yaml"));

        // Well-formed YAML with the wrong shape is rejected as well
        assert!(parse_template("- just\n- a list\n", "list.yaml").is_err());
    }

    #[test]
    fn test_yaml11_booleans() {
        for (text, expected) in [("yes", true), ("On", true), ("no", false), ("OFF", false)] {
            let template = parse_template(&format!("allow-lan: {}\n", text), "test").unwrap();
            assert_eq!(template.allow_lan, expected, "allow-lan: {}", text);
        }
        assert!(parse_template("allow-lan: true\n", "test").unwrap().allow_lan);
        assert!(!parse_template("allow-lan:\n", "test").unwrap().allow_lan);
        assert!(matches!(
            parse_template("allow-lan: sometimes\n", "test"),
            Err(ConvertError::TemplateParseError { .. })
        ));
    }

    #[actix_web::test]
    async fn test_missing_template_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let doc = proxy_to_clash(
            path.to_str().unwrap(),
            vec![proxy("node-a")],
            &["node-a".to_string()],
        )
        .await
        .unwrap();
        assert_eq!(doc.proxy_groups[0].name, "PROXY");
        assert_eq!(doc.rules, vec!["MATCH,DIRECT"]);
    }

    #[actix_web::test]
    async fn test_template_file_is_used() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TEMPLATE.as_bytes()).unwrap();
        let doc = proxy_to_clash(
            file.path().to_str().unwrap(),
            vec![proxy("node-a")],
            &["node-a".to_string()],
        )
        .await
        .unwrap();
        assert_eq!(doc.proxy_groups[0].name, "Proxy");
        assert_eq!(doc.proxy_groups[0].proxies, vec!["node-a"]);
    }

    #[actix_web::test]
    async fn test_malformed_template_file_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"proxy-groups: {{{").unwrap();
        let result = proxy_to_clash(
            file.path().to_str().unwrap(),
            vec![proxy("a")],
            &["a".to_string()],
        )
        .await;
        assert!(matches!(
            result,
            Err(ConvertError::TemplateParseError { .. })
        ));
    }
}
