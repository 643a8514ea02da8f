use std::collections::BTreeMap;

use crate::error::ConvertError;
use crate::generator::yaml::clash_output::{ClashProxy, WsOpts};
use crate::models::VmessNode;

/// Cipher written for every vmess proxy; the client negotiates the real one.
pub const VMESS_DEFAULT_CIPHER: &str = "auto";

const TLS_TOKEN: &str = "tls";
const WS_NETWORK: &str = "ws";

/// Convert a decoded vmess node into a Clash proxy entry
///
/// Certificate verification is always skipped on generated entries.
///
/// # Returns
/// * `Err(ConvertError::InvalidPort)` - when the port is not an integer in 1..=65535
pub fn vmess_to_clash(node: &VmessNode) -> Result<ClashProxy, ConvertError> {
    let port = match node.port.trim().parse::<u16>() {
        Ok(port) if port > 0 => port,
        _ => return Err(ConvertError::InvalidPort(node.port.clone())),
    };

    let ws_opts = if node.net == WS_NETWORK {
        let mut headers = BTreeMap::new();
        headers.insert("Host".to_string(), node.host.clone());
        Some(WsOpts {
            path: node.path.clone(),
            headers,
        })
    } else {
        None
    };

    Ok(ClashProxy {
        name: node.ps.clone(),
        proxy_type: "vmess".to_string(),
        server: node.add.clone(),
        port,
        uuid: node.id.clone(),
        alter_id: node.aid,
        cipher: VMESS_DEFAULT_CIPHER.to_string(),
        tls: node.tls == TLS_TOKEN,
        network: node.net.clone(),
        ws_opts,
        skip_cert_verify: true,
    })
}
