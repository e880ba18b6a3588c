//! Toolchain Configuration Module
//!
//! Provides configuration loading for the adapter query client.
//! Layers built-in defaults, an optional TOML file and `ADAPTER_`-prefixed
//! environment variables, in that order.

use anyhow::{anyhow, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use crate::compiler::{default_profiles, CompilerProfile};
use crate::defaults::{client, mainnet, networks};
use crate::network::{NetworkProfile, NetworkSettings};

/// Main toolchain configuration structure
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ToolchainConfig {
    /// Network used when none is requested explicitly
    pub default_network: String,

    /// Deployed adapter and its constructor arguments
    pub adapter: AdapterSettings,

    /// Named network profiles
    pub networks: BTreeMap<String, NetworkSettings>,

    /// Compiler profiles for the adapter sources
    pub compilers: Vec<CompilerProfile>,
}

/// Adapter deployment settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AdapterSettings {
    /// Deployed adapter address; unset until a deployment exists
    #[serde(default)]
    pub address: Option<String>,

    /// Router the adapter was constructed with
    pub router: String,

    /// Factory the adapter was constructed with
    pub factory: String,

    pub rpc_timeout_ms: u64,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            address: None,
            router: mainnet::UNISWAP_V2_ROUTER_02.to_string(),
            factory: mainnet::UNISWAP_V2_FACTORY.to_string(),
            rpc_timeout_ms: client::RPC_TIMEOUT_MS,
        }
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        let mut network_map = BTreeMap::new();

        network_map.insert(
            networks::HARDHAT.to_string(),
            NetworkSettings {
                fork_block: Some(mainnet::FORK_BLOCK),
                chain_id: Some(1),
                ..NetworkSettings::new(networks::MAINNET_RPC_URL)
            },
        );
        network_map.insert(
            networks::ROPSTEN.to_string(),
            NetworkSettings {
                accounts: vec![networks::TEST_ACCOUNT.to_string()],
                chain_id: Some(3),
                ..NetworkSettings::new(networks::ROPSTEN_RPC_URL)
            },
        );
        network_map.insert(
            networks::KOVAN.to_string(),
            NetworkSettings {
                accounts: vec![networks::TEST_ACCOUNT.to_string()],
                chain_id: Some(42),
                ..NetworkSettings::new(networks::KOVAN_RPC_URL)
            },
        );

        Self {
            default_network: networks::DEFAULT_NETWORK.to_string(),
            adapter: AdapterSettings::default(),
            networks: network_map,
            compilers: default_profiles(),
        }
    }
}

impl ToolchainConfig {
    /// Load configuration from defaults, a file and the environment.
    ///
    /// An explicit `path` must exist; without one the default location is
    /// read only if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let defaults = Config::try_from(&ToolchainConfig::default())
            .context("Failed to build default configuration")?;

        let mut builder = Config::builder().add_source(defaults);

        match path {
            Some(path) => {
                info!("Loading adapter config: {:?}", path);
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                debug!("Looking for optional config at {}", client::CONFIG_PATH);
                builder = builder.add_source(File::with_name(client::CONFIG_PATH).required(false));
            }
        }

        // Override with environment variables (ADAPTER_ prefix)
        builder = builder.add_source(env);

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Resolve a named network profile
    pub fn network(&self, name: &str) -> Result<NetworkProfile> {
        let settings = self.networks.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.networks.keys().map(String::as_str).collect();
            anyhow!("Unknown network '{}' (configured: {})", name, known.join(", "))
        })?;

        settings.resolve(name)
    }

    /// Resolve the default network profile
    pub fn default_network_profile(&self) -> Result<NetworkProfile> {
        self.network(&self.default_network)
    }

    /// Look up a compiler profile by exact version
    pub fn compiler(&self, version: &str) -> Option<&CompilerProfile> {
        self.compilers.iter().find(|c| c.version == version)
    }
}

/// `ADAPTER_`-prefixed overrides, `__` between nested keys.
///
/// Values stay strings; numeric fields are converted on deserialization so
/// hex addresses and keys made only of digits are never read as numbers.
fn environment() -> Environment {
    Environment::with_prefix(client::ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Convenience function to load configuration with defaults
pub fn load_config(path: Option<&Path>) -> Result<ToolchainConfig> {
    ToolchainConfig::load(path)
}
