use log::{debug, warn};

use crate::error::ConvertError;
use crate::generator::exports::proxy_to_clash::vmess_to_clash;
use crate::generator::yaml::clash_output::ClashProxy;
use crate::parser::explodes::explode_vmess;
use crate::utils::base64::base64_decode_bytes;

/// Result of folding every subscription line through decode and map
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParseOutcome {
    /// Converted proxies, in subscription order
    pub proxies: Vec<ClashProxy>,
    /// Names of `proxies`, same order
    pub names: Vec<String>,
    /// vmess lines that failed to decode or map
    pub skipped: usize,
}

impl ParseOutcome {
    fn push(mut self, proxy: ClashProxy) -> Self {
        self.names.push(proxy.name.clone());
        self.proxies.push(proxy);
        self
    }

    fn skip(mut self) -> Self {
        self.skipped += 1;
        self
    }
}

/// Decode and map a single line.
///
/// `Ok(None)` means the line is not a vmess link.
pub fn parse_link(line: &str) -> Result<Option<ClashProxy>, ConvertError> {
    match explode_vmess(line)? {
        Some(node) => vmess_to_clash(&node).map(Some).map_err(|e| {
            debug!("vmess node '{}' rejected", node.ps);
            e
        }),
        None => Ok(None),
    }
}

/// Parse a decoded subscription body, one link per line.
///
/// Per-line failures are logged and counted, never propagated.
pub fn parse_nodes(content: &str) -> ParseOutcome {
    content
        .lines()
        .map(str::trim)
        .fold(ParseOutcome::default(), |outcome, line| match parse_link(line) {
            Ok(Some(proxy)) => outcome.push(proxy),
            Ok(None) => {
                if !line.is_empty() {
                    debug!("Ignoring non-vmess line");
                }
                outcome
            }
            Err(e) => {
                warn!("Skipping vmess link: {}", e);
                outcome.skip()
            }
        })
}

/// Decode the base64 subscription body and parse every link in it
pub fn parse_subscription(body: &str) -> Result<ParseOutcome, ConvertError> {
    let decoded = base64_decode_bytes(body).map_err(|e| {
        ConvertError::DecodeError(format!("failed to decode base64 subscription content: {}", e))
    })?;
    let content = String::from_utf8_lossy(&decoded);
    Ok(parse_nodes(&content))
}
