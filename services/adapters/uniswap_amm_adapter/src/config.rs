//! Configuration for the adapter query client

use adapter_config::defaults::{client, mainnet};
use adapter_config::{NetworkProfile, SigningKey, ToolchainConfig};
use anyhow::{anyhow, Context, Result};
use web3::signing::{Key, SecretKey, SecretKeyRef};
use web3::types::Address;

use crate::calldata::parse_address;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deployed adapter address
    pub adapter_address: Address,

    /// Primary RPC endpoint
    pub primary_rpc: String,

    /// Fallback RPC endpoints
    pub fallback_rpcs: Vec<String>,

    /// RPC timeout in milliseconds
    pub rpc_timeout_ms: u64,

    /// Block every query is pinned to (forked mainnet)
    pub fork_block: Option<u64>,

    /// `from` address for queries, derived from the network's signing key
    pub caller: Option<Address>,

    /// Router the adapter was constructed with
    pub router: Address,

    /// Factory the adapter was constructed with
    pub factory: Address,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            adapter_address: Address::zero(),
            primary_rpc: "http://127.0.0.1:8545".to_string(),
            fallback_rpcs: Vec::new(),
            rpc_timeout_ms: client::RPC_TIMEOUT_MS,
            fork_block: None,
            caller: None,
            router: parse_address(mainnet::UNISWAP_V2_ROUTER_02).unwrap_or_default(),
            factory: parse_address(mainnet::UNISWAP_V2_FACTORY).unwrap_or_default(),
        }
    }
}

impl ClientConfig {
    /// Build from toolchain configuration and a resolved network profile.
    ///
    /// `adapter_override` wins over the configured adapter address.
    pub fn from_profile(
        toolchain: &ToolchainConfig,
        network: &NetworkProfile,
        adapter_override: Option<&str>,
    ) -> Result<Self> {
        let adapter = adapter_override
            .or(toolchain.adapter.address.as_deref())
            .ok_or_else(|| {
                anyhow!("No adapter address configured (set adapter.address or pass --adapter)")
            })?;

        let caller = network
            .signer()
            .map(caller_address)
            .transpose()
            .with_context(|| format!("Invalid signing key for network '{}'", network.name))?;

        Ok(Self {
            adapter_address: parse_address(adapter).context("Invalid adapter address")?,
            primary_rpc: network.url.clone(),
            fallback_rpcs: network.fallback_urls.clone(),
            rpc_timeout_ms: toolchain.adapter.rpc_timeout_ms,
            fork_block: network.fork_block,
            caller,
            router: parse_address(&toolchain.adapter.router).context("Invalid router address")?,
            factory: parse_address(&toolchain.adapter.factory)
                .context("Invalid factory address")?,
        })
    }
}

/// Address controlled by a signing key
pub fn caller_address(key: &SigningKey) -> Result<Address> {
    let secret = SecretKey::from_slice(key.as_bytes())
        .map_err(|e| anyhow!("Signing key is not a valid secp256k1 key: {}", e))?;
    Ok(SecretKeyRef::new(&secret).address())
}
