use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// Token that expands to every generated proxy name
pub const PROXIES_PLACEHOLDER: &str = "${proxies}";

/// Members of a proxy group as written in the template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberList {
    /// `proxies: "${proxies}"`
    Placeholder,
    /// An explicit list, copied as is
    Literal(Vec<String>),
}

impl MemberList {
    /// Resolve the member list against the generated proxy names.
    ///
    /// Only a whole-field placeholder expands. A `${proxies}` item inside a
    /// literal list stays a literal member.
    pub fn resolve(&self, proxy_names: &[String]) -> Vec<String> {
        match self {
            MemberList::Placeholder => proxy_names.to_vec(),
            MemberList::Literal(members) => members.clone(),
        }
    }
}

impl Default for MemberList {
    fn default() -> Self {
        MemberList::Literal(Vec::new())
    }
}

impl<'de> Deserialize<'de> for MemberList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawMembers {
            Text(String),
            List(Vec<Value>),
            Other(IgnoredAny),
        }

        Ok(match RawMembers::deserialize(deserializer)? {
            RawMembers::Text(s) if s == PROXIES_PLACEHOLDER => MemberList::Placeholder,
            // Any other scalar is not a usable member list
            RawMembers::Text(_) | RawMembers::Other(_) => MemberList::default(),
            RawMembers::List(items) => MemberList::Literal(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
        })
    }
}

/// A proxy group entry from the template
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProxyGroupConfig {
    /// Name of the proxy group
    pub name: String,
    /// Type of the proxy group (select, url-test, ...)
    #[serde(rename = "type")]
    pub group_type: String,
    /// Members, possibly the placeholder
    pub proxies: MemberList,
}

/// A collection of proxy group configurations
pub type ProxyGroupConfigs = Vec<ProxyGroupConfig>;
