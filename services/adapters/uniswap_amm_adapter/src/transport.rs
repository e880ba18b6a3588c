//! Call transport for adapter queries
//!
//! Every adapter query is a single `eth_call`. [`Web3Transport`] sends it
//! over HTTP JSON-RPC, trying fallback endpoints when a node fails. A revert
//! is an answer from the adapter, not a node failure, so it is returned
//! immediately and never retried elsewhere.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use web3::transports::Http;
use web3::types::{Address, BlockId, BlockNumber, Bytes, CallRequest, U64};
use web3::Web3;

use crate::error::{AdapterError, Result};
use crate::revert;

/// A read-only contract call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthCall {
    /// Contract being queried
    pub to: Address,

    /// Selector and encoded arguments
    pub data: Vec<u8>,

    /// Caller, if the node should see one
    pub from: Option<Address>,

    /// Block to execute against; latest when unset
    pub block: Option<u64>,
}

/// Outcome of a failed `eth_call`
#[derive(Debug, Clone, Error)]
pub enum CallError {
    /// Contract execution reverted
    #[error("call reverted: {message}")]
    Reverted {
        /// Node's error message
        message: String,
        /// JSON-RPC error data, often carrying the ABI-encoded reason
        data: Option<Value>,
    },

    /// The node could not be reached or did not answer
    #[error("{0}")]
    Transport(String),
}

impl CallError {
    /// Revert from an ABI `Error(string)` payload
    pub fn revert_with_reason(reason: &str) -> Self {
        Self::Reverted {
            message: "execution reverted".to_string(),
            data: Some(Value::String(format!(
                "0x{}",
                hex::encode(revert::encode_error_string(reason))
            ))),
        }
    }
}

/// Sends `eth_call`s to some node
#[async_trait]
pub trait CallTransport: Send + Sync {
    async fn eth_call(&self, call: &EthCall) -> std::result::Result<Vec<u8>, CallError>;
}

/// HTTP JSON-RPC transport with ordered fallback endpoints
pub struct Web3Transport {
    endpoints: Vec<(String, Web3<Http>)>,
    timeout: Duration,
}

impl Web3Transport {
    /// Create new transport with configured endpoints
    pub fn new(primary: &str, fallbacks: &[String], timeout: Duration) -> Result<Self> {
        let mut endpoints = Vec::new();

        // Add primary RPC
        let transport = Http::new(primary)
            .map_err(|e| AdapterError::Transport(format!("Invalid RPC endpoint: {}", e)))?;
        endpoints.push((primary.to_string(), Web3::new(transport)));

        // Add fallback RPCs
        for rpc_url in fallbacks {
            match Http::new(rpc_url) {
                Ok(transport) => endpoints.push((rpc_url.clone(), Web3::new(transport))),
                Err(e) => warn!("Skipping invalid fallback RPC endpoint: {}", e),
            }
        }

        Ok(Self { endpoints, timeout })
    }

    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }

    async fn call_with_client(
        &self,
        url: &str,
        web3: &Web3<Http>,
        call: &EthCall,
    ) -> std::result::Result<Vec<u8>, CallError> {
        let request = CallRequest {
            from: call.from,
            to: Some(call.to),
            data: Some(Bytes(call.data.clone())),
            ..Default::default()
        };
        let block = call
            .block
            .map(|n| BlockId::Number(BlockNumber::Number(U64::from(n))));

        let response = tokio::time::timeout(self.timeout, web3.eth().call(request, block))
            .await
            .map_err(|_| {
                CallError::Transport(format!("timed out after {}ms", self.timeout.as_millis()))
            })?;

        match response {
            Ok(bytes) => Ok(bytes.0),
            Err(web3::Error::Rpc(err)) if revert::is_revert_error(&err.message, err.data.as_ref()) => {
                Err(CallError::Reverted {
                    message: err.message,
                    data: err.data,
                })
            }
            Err(e) => Err(CallError::Transport(scrub_url(&e.to_string(), url))),
        }
    }
}

#[async_trait]
impl CallTransport for Web3Transport {
    async fn eth_call(&self, call: &EthCall) -> std::result::Result<Vec<u8>, CallError> {
        let mut last_error = CallError::Transport("no RPC endpoints configured".to_string());

        // Try each RPC endpoint until one answers
        for (idx, (url, web3)) in self.endpoints.iter().enumerate() {
            match self.call_with_client(url, web3, call).await {
                Ok(output) => {
                    debug!("eth_call answered by RPC endpoint {}", idx);
                    return Ok(output);
                }
                Err(revert @ CallError::Reverted { .. }) => return Err(revert),
                Err(e) => {
                    warn!("RPC endpoint {} ({}) failed: {}", idx, redact_url(url), e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

/// Byte range of `user@host:port` within a URL
fn authority_span(url: &str) -> (usize, usize) {
    let start = url.find("://").map(|idx| idx + 3).unwrap_or(0);
    let end = url[start..]
        .find(|c: char| c == '/' || c == '?' || c == '#')
        .map(|idx| start + idx)
        .unwrap_or(url.len());
    (start, end)
}

/// Endpoint URLs commonly embed API keys in the path, so only the scheme
/// and host survive
fn redact_url(url: &str) -> String {
    let (host_start, host_end) = authority_span(url);

    let authority = &url[host_start..host_end];
    let authority = match authority.rfind('@') {
        Some(idx) => format!("***@{}", &authority[idx + 1..]),
        None => authority.to_string(),
    };

    let rest = &url[host_end..];
    let rest = if rest.is_empty() || rest == "/" { rest } else { "/***" };

    format!("{}{}{}", &url[..host_start], authority, rest)
}

/// Remove an endpoint URL and its secret parts from error text
fn scrub_url(message: &str, url: &str) -> String {
    let mut message = message.replace(url, &redact_url(url));
    let (host_start, host_end) = authority_span(url);

    // Clients may normalise the host, so also drop the secret parts on their own
    let path = &url[host_end..];
    if path.len() > 1 {
        message = message.replace(path, "/***");
    }
    if let Some(idx) = url[host_start..host_end].rfind('@') {
        let userinfo = &url[host_start..host_start + idx];
        if !userinfo.is_empty() {
            message = message.replace(userinfo, "***");
        }
    }

    message
}
