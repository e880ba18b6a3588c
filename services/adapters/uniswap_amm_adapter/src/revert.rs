//! Revert reason extraction
//!
//! Nodes report a reverted `eth_call` in different shapes. The reason string
//! may sit ABI-encoded in the JSON-RPC error `data` (as a hex string, or
//! nested one level down as `{"data": "0x..."}`), or only in the error
//! message:
//!
//! - geth: `execution reverted: <reason>`
//! - Hardhat: `... reverted with reason string '<reason>'`
//! - Ganache: `VM Exception while processing transaction: revert <reason>`

use ethabi::{ParamType, Token};
use serde_json::Value;

/// Selector of `Error(string)`
pub const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

const HARDHAT_MARKER: &str = "reverted with reason string '";
const GETH_MARKER: &str = "execution reverted: ";
const GANACHE_MARKER: &str = "VM Exception while processing transaction: revert ";

/// Decode an ABI `Error(string)` payload
pub fn decode_error_string(data: &[u8]) -> Option<String> {
    if data.len() < 4 || data[..4] != ERROR_STRING_SELECTOR {
        return None;
    }

    match ethabi::decode(&[ParamType::String], &data[4..]).ok()?.pop()? {
        Token::String(reason) => Some(reason),
        _ => None,
    }
}

/// Encode a reason as an `Error(string)` payload
pub fn encode_error_string(reason: &str) -> Vec<u8> {
    let mut data = ERROR_STRING_SELECTOR.to_vec();
    data.extend(ethabi::encode(&[Token::String(reason.to_string())]));
    data
}

/// Reason from the JSON-RPC error `data` field
pub fn reason_from_rpc_data(data: &Value) -> Option<String> {
    match data {
        Value::String(hex_data) => {
            let digits = hex_data.strip_prefix("0x").unwrap_or(hex_data);
            let bytes = hex::decode(digits).ok()?;
            decode_error_string(&bytes)
        }
        Value::Object(fields) => fields.get("data").and_then(reason_from_rpc_data),
        _ => None,
    }
}

/// Reason from a node's error message
pub fn reason_from_message(message: &str) -> Option<String> {
    if let Some(start) = message.find(HARDHAT_MARKER) {
        let rest = &message[start + HARDHAT_MARKER.len()..];
        let end = rest.rfind('\'')?;
        return Some(rest[..end].to_string());
    }

    if let Some(start) = message.find(GETH_MARKER) {
        return Some(message[start + GETH_MARKER.len()..].trim().to_string());
    }

    if let Some(start) = message.find(GANACHE_MARKER) {
        return Some(message[start + GANACHE_MARKER.len()..].trim().to_string());
    }

    None
}

/// Best available reason for a reverted call. Structured data wins over
/// message parsing.
pub fn extract_reason(message: &str, data: Option<&Value>) -> Option<String> {
    data.and_then(reason_from_rpc_data)
        .or_else(|| reason_from_message(message))
}

/// Whether a JSON-RPC error describes a revert rather than a node failure
pub fn is_revert_error(message: &str, data: Option<&Value>) -> bool {
    message.to_ascii_lowercase().contains("revert")
        || data.and_then(reason_from_rpc_data).is_some()
}
