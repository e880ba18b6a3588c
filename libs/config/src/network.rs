//! Network profiles
//!
//! A profile is stored as [`NetworkSettings`] with unexpanded `${VAR}`
//! references and resolved into a [`NetworkProfile`] only when selected, so
//! credentials for networks that are never used need not be present.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Network settings as written in configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NetworkSettings {
    /// RPC endpoint, may reference environment variables
    pub url: String,

    /// Pin every query to this block (forked mainnet)
    #[serde(default)]
    pub fork_block: Option<u64>,

    /// Endpoints tried in order when the primary fails
    #[serde(default)]
    pub fallback_urls: Vec<String>,

    /// Hex private keys, may reference environment variables
    #[serde(default)]
    pub accounts: Vec<String>,

    #[serde(default)]
    pub chain_id: Option<u64>,
}

/// Fully resolved network profile
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    pub name: String,
    pub url: String,
    pub fallback_urls: Vec<String>,
    pub fork_block: Option<u64>,
    pub chain_id: Option<u64>,
    pub accounts: Vec<SigningKey>,
}

/// 32-byte secp256k1 private key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey([u8; 32]);

impl SigningKey {
    /// Parse a hex key, with or without `0x`
    pub fn from_hex(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(digits).context("Signing key is not valid hex")?;
        let key: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| anyhow!("Signing key must be 32 bytes, got {}", b.len()))?;
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

impl NetworkSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fork_block: None,
            fallback_urls: Vec::new(),
            accounts: Vec::new(),
            chain_id: None,
        }
    }

    /// Expand environment references and decode signing keys
    pub fn resolve(&self, name: &str) -> Result<NetworkProfile> {
        let url = expand(&self.url)
            .with_context(|| format!("Failed to expand RPC URL for network '{}'", name))?;

        let fallback_urls = self
            .fallback_urls
            .iter()
            .map(|u| expand(u))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Failed to expand fallback URLs for network '{}'", name))?;

        let accounts = self
            .accounts
            .iter()
            .map(|a| expand(a).and_then(|key| SigningKey::from_hex(&key)))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Failed to resolve accounts for network '{}'", name))?;

        Ok(NetworkProfile {
            name: name.to_string(),
            url,
            fallback_urls,
            fork_block: self.fork_block,
            chain_id: self.chain_id,
            accounts,
        })
    }
}

impl NetworkProfile {
    /// First configured account, used as the caller of read-only queries
    pub fn signer(&self) -> Option<&SigningKey> {
        self.accounts.first()
    }

    pub fn is_fork(&self) -> bool {
        self.fork_block.is_some()
    }
}

fn expand(value: &str) -> Result<String> {
    let expanded = shellexpand::env(value).map_err(|e| anyhow!("{}", e))?;
    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn test_signing_key_parsing() {
        let with_prefix = SigningKey::from_hex(&format!("0x{}", KEY)).unwrap();
        let bare = SigningKey::from_hex(KEY).unwrap();
        assert_eq!(with_prefix, bare);

        assert!(SigningKey::from_hex("0x1234").is_err());
        assert!(SigningKey::from_hex("not-hex").is_err());
    }

    #[test]
    fn test_signing_key_is_redacted() {
        let key = SigningKey::from_hex(KEY).unwrap();
        let printed = format!("{:?}", key);
        assert!(!printed.contains("4c0883"));
        assert!(printed.contains("redacted"));
    }

    #[test]
    fn test_resolve_expands_environment() {
        std::env::set_var("ADAPTER_CONFIG_TEST_API_KEY", "abc123");
        std::env::set_var("ADAPTER_CONFIG_TEST_PK", KEY);

        let settings = NetworkSettings {
            url: "https://eth-ropsten.alchemyapi.io/v2/${ADAPTER_CONFIG_TEST_API_KEY}".to_string(),
            fork_block: None,
            fallback_urls: vec!["http://127.0.0.1:8545".to_string()],
            accounts: vec!["0x${ADAPTER_CONFIG_TEST_PK}".to_string()],
            chain_id: Some(3),
        };

        let profile = settings.resolve("ropsten").unwrap();
        assert_eq!(profile.name, "ropsten");
        assert_eq!(profile.url, "https://eth-ropsten.alchemyapi.io/v2/abc123");
        assert_eq!(profile.fallback_urls, vec!["http://127.0.0.1:8545".to_string()]);
        assert!(profile.signer().is_some());
        assert!(!profile.is_fork());
    }

    #[test]
    fn test_resolve_missing_variable_names_it() {
        let settings = NetworkSettings::new("https://rpc.example/${ADAPTER_CONFIG_TEST_UNSET_VAR}");
        let err = settings.resolve("kovan").unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("kovan"));
        assert!(chain.contains("ADAPTER_CONFIG_TEST_UNSET_VAR"));
    }
}
