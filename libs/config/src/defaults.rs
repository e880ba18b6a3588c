//! Default configuration values and constants
//!
//! Values used when no configuration file overrides them. The network
//! defaults reproduce the toolchain's original profile set.

/// Ethereum mainnet contract addresses
pub mod mainnet {
    /// Uniswap V2 Router02, the adapter's spender
    pub const UNISWAP_V2_ROUTER_02: &str = "0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D";

    /// Uniswap V2 Factory
    pub const UNISWAP_V2_FACTORY: &str = "0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f";

    /// Block the forked-mainnet profile is pinned to
    pub const FORK_BLOCK: u64 = 11_095_000;

    /// Zero address, accepted by `getSpenderAddress`
    pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";
}

/// Network profile defaults
pub mod networks {
    /// Profile used when none is selected
    pub const DEFAULT_NETWORK: &str = "hardhat";

    /// Forked mainnet profile name
    pub const HARDHAT: &str = "hardhat";

    /// Public test network profile names
    pub const ROPSTEN: &str = "ropsten";
    pub const KOVAN: &str = "kovan";

    pub const MAINNET_RPC_URL: &str = "https://eth-mainnet.alchemyapi.io/v2/${ALCHEMY_API_KEY}";
    pub const ROPSTEN_RPC_URL: &str = "https://eth-ropsten.alchemyapi.io/v2/${ALCHEMY_API_KEY}";
    pub const KOVAN_RPC_URL: &str = "https://eth-kovan.alchemyapi.io/v2/${ALCHEMY_API_KEY}";

    /// Signing key reference for the public test networks
    pub const TEST_ACCOUNT: &str = "0x${TEST_ACCOUNT_PK}";
}

/// Compiler profile defaults
pub mod compilers {
    /// Solidity versions the adapter sources are compiled with
    pub const SOLC_VERSIONS: [&str; 2] = ["0.6.6", "0.6.12"];
}

/// Query client defaults
pub mod client {
    /// RPC timeout (milliseconds)
    pub const RPC_TIMEOUT_MS: u64 = 10_000;

    /// Default configuration file location
    pub const CONFIG_PATH: &str = "config/adapter.toml";

    /// Prefix for environment variable overrides (`ADAPTER_ADAPTER__ADDRESS`)
    pub const ENV_PREFIX: &str = "ADAPTER";
}
