use crate::error::ConvertError;
use crate::models::VmessNode;
use crate::utils::base64::{base64_decode_bytes, pad_base64};

/// Scheme prefix of a vmess share link
pub const VMESS_SCHEME: &str = "vmess://";

/// Parse a VMess link into a VmessNode
///
/// # Returns
/// * `Ok(None)` - The line is not a vmess link and should be ignored
/// * `Ok(Some(node))` - The decoded node
/// * `Err(ConvertError::DecodeError)` - The payload is not base64 or not valid JSON
pub fn explode_vmess(link: &str) -> Result<Option<VmessNode>, ConvertError> {
    let encoded = match link.strip_prefix(VMESS_SCHEME) {
        Some(encoded) => encoded,
        None => return Ok(None),
    };

    let decoded = base64_decode_bytes(&pad_base64(encoded))
        .map_err(|e| ConvertError::DecodeError(format!("invalid vmess base64: {}", e)))?;

    let node: VmessNode = serde_json::from_slice(&decoded)
        .map_err(|e| ConvertError::DecodeError(format!("invalid vmess JSON: {}", e)))?;

    Ok(Some(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64::base64_encode;

    const SAMPLE_JSON: &str = r#"{"add":"1.2.3.4","aid":0,"host":"","id":"abc-123","net":"tcp","path":"","port":"443","ps":"test-node","tls":"tls","type":"none","v":"2"}"#;

    #[test]
    fn test_explode_vmess() {
        let link = format!("vmess://{}", base64_encode(SAMPLE_JSON));
        let node = explode_vmess(&link).unwrap().unwrap();
        assert_eq!(node.add, "1.2.3.4");
        assert_eq!(node.port, "443");
        assert_eq!(node.ps, "test-node");
    }

    #[test]
    fn test_explode_vmess_without_padding() {
        let encoded = base64_encode(SAMPLE_JSON);
        let stripped = encoded.trim_end_matches('=');
        let link = format!("vmess://{}", stripped);
        if stripped.len() % 4 != 0 {
            assert!(base64_decode_bytes(stripped).is_err());
        }
        let node = explode_vmess(&link).unwrap().unwrap();
        assert_eq!(node.id, "abc-123");
    }

    #[test]
    fn test_other_schemes_are_ignored() {
        assert!(explode_vmess("").unwrap().is_none());
        assert!(explode_vmess("ss://YWVzLTI1Ni1nY206cGFzcw@1.2.3.4:8388")
            .unwrap()
            .is_none());
        assert!(explode_vmess("VMESS://abcd").unwrap().is_none());
    }

    #[test]
    fn test_bad_payloads_are_decode_errors() {
        assert!(matches!(
            explode_vmess("vmess://!!!not-base64!!!"),
            Err(ConvertError::DecodeError(_))
        ));

        let link = format!("vmess://{}", base64_encode("this is not json"));
        assert!(matches!(
            explode_vmess(&link),
            Err(ConvertError::DecodeError(_))
        ));
    }
}
