pub mod clash_output;

#[cfg(test)]
mod tests {
    use super::clash_output::{ClashProxy, ClashProxyGroup, ClashYamlOutput, WsOpts};
    use serde_yaml::Value;
    use std::collections::BTreeMap;

    fn sample_proxy() -> ClashProxy {
        ClashProxy {
            name: "hk-01".to_string(),
            proxy_type: "vmess".to_string(),
            server: "hk.example.com".to_string(),
            port: 443,
            uuid: "abc-123".to_string(),
            alter_id: 0,
            cipher: "auto".to_string(),
            tls: true,
            network: String::new(),
            ws_opts: None,
            skip_cert_verify: true,
        }
    }

    #[test]
    fn test_proxy_field_names() {
        let value = serde_yaml::to_value(sample_proxy()).unwrap();
        assert_eq!(value["type"], Value::from("vmess"));
        assert_eq!(value["alterId"], Value::from(0));
        assert_eq!(value["skip-cert-verify"], Value::from(true));
        assert!(value.get("network").is_none());
        assert!(value.get("ws-opts").is_none());
    }

    #[test]
    fn test_ws_opts_output() {
        let mut proxy = sample_proxy();
        proxy.network = "ws".to_string();
        let mut headers = BTreeMap::new();
        headers.insert("Host".to_string(), "cdn.example.com".to_string());
        proxy.ws_opts = Some(WsOpts {
            path: "/ray".to_string(),
            headers,
        });

        let value = serde_yaml::to_value(proxy).unwrap();
        assert_eq!(value["network"], Value::from("ws"));
        assert_eq!(value["ws-opts"]["path"], Value::from("/ray"));
        assert_eq!(
            value["ws-opts"]["headers"]["Host"],
            Value::from("cdn.example.com")
        );
    }

    #[test]
    fn test_document_key_order() {
        let doc = ClashYamlOutput {
            port: 7890,
            socks_port: 7891,
            allow_lan: true,
            mode: "Rule".to_string(),
            log_level: "info".to_string(),
            external_controller: "127.0.0.1:9090".to_string(),
            proxies: vec![sample_proxy()],
            proxy_groups: vec![ClashProxyGroup {
                name: "PROXY".to_string(),
                group_type: "select".to_string(),
                proxies: vec!["hk-01".to_string()],
            }],
            rule_providers: BTreeMap::new(),
            rules: vec!["MATCH,DIRECT".to_string()],
        };
        let text = doc.to_yaml().unwrap();
        let keys: Vec<&str> = text
            .lines()
            .filter(|l| !l.starts_with(' ') && !l.starts_with('-'))
            .filter_map(|l| l.split(':').next())
            .collect();
        assert_eq!(
            keys,
            vec![
                "port",
                "socks-port",
                "allow-lan",
                "mode",
                "log-level",
                "external-controller",
                "proxies",
                "proxy-groups",
                "rules"
            ]
        );
    }
}
