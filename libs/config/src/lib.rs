//! # Adapter Toolchain Configuration
//!
//! Centralized configuration for everything that talks to a deployed
//! `UniswapAmmAdapter`: which network to query, how to reach it, and which
//! compiler profiles the adapter sources are built with.
//!
//! ## Features
//!
//! - **Network Profiles**: RPC endpoint, fallbacks, fork block and signing key,
//!   with `${VAR}` expansion from the environment
//! - **Compiler Profiles**: the solc versions the adapter sources target
//! - **Defaults**: mainnet Uniswap V2 addresses and the built-in profiles
//!
//! ## Usage
//!
//! ```rust,no_run
//! use adapter_config::load_config;
//!
//! let config = load_config(None)?;
//! let network = config.network("hardhat")?;
//! println!("querying {} at block {:?}", network.url, network.fork_block);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod compiler;
pub mod defaults;
pub mod network;
pub mod toolchain;

// Re-export commonly used types
pub use compiler::CompilerProfile;
pub use network::{NetworkProfile, NetworkSettings, SigningKey};
pub use toolchain::{load_config, AdapterSettings, ToolchainConfig};
