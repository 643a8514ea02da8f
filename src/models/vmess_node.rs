use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Fields carried by the JSON payload of a `vmess://` link.
///
/// Address and id are opaque. The port stays textual here; it is validated
/// when the node is mapped to a Clash proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VmessNode {
    /// Server address
    #[serde(deserialize_with = "lenient_string")]
    pub add: String,
    /// Alter id, passed through as is. Some panels emit negative values.
    #[serde(deserialize_with = "lenient_i64")]
    pub aid: i64,
    /// Disguise host, sent as the websocket `Host` header
    #[serde(deserialize_with = "lenient_string")]
    pub host: String,
    /// User UUID
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    /// Transport network (tcp, ws, ...)
    #[serde(deserialize_with = "lenient_string")]
    pub net: String,
    /// Websocket path
    #[serde(deserialize_with = "lenient_string")]
    pub path: String,
    #[serde(deserialize_with = "lenient_string")]
    pub port: String,
    /// Remark, used as the proxy name
    #[serde(deserialize_with = "lenient_string")]
    pub ps: String,
    #[serde(deserialize_with = "lenient_string")]
    pub tls: String,
    /// Header obfuscation type (none, http)
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub obfs_type: String,
    /// Link format version
    #[serde(deserialize_with = "lenient_string")]
    pub v: String,
}

// Share links are produced by many panels; some emit numbers where strings are
// expected and vice versa, and some emit explicit nulls.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string, found {}",
            other
        ))),
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("invalid integer: {}", n))),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("invalid integer: {}", s))),
        other => Err(de::Error::custom(format!(
            "expected an integer, found {}",
            other
        ))),
    }
}
