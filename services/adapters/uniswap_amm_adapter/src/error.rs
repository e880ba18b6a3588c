//! Error types for adapter queries

use thiserror::Error;
use web3::types::Address;

/// Revert reason when the pool reference does not resolve to a pool
pub const NO_POOL_FOUND: &str = "No pool found for token pair";

/// Revert reason when the pool exists but holds a different pair
pub const POOL_TOKEN_MISMATCH: &str = "Pool does not match token pair";

/// Revert reason for every single-asset query
pub const SINGLE_ASSET_UNSUPPORTED: &str = "Uniswap pools require a token pair";

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Main error type for adapter operations
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Pool reference is not a recognised pool contract
    #[error("{}", NO_POOL_FOUND)]
    InvalidPool,

    /// Pool is valid but not for the requested token pair
    #[error("{}", POOL_TOKEN_MISMATCH)]
    PoolTokenMismatch,

    /// Single-asset liquidity is not supported by Uniswap pools
    #[error("{}", SINGLE_ASSET_UNSUPPORTED)]
    UnsupportedSingleAsset,

    /// Any other adapter revert, reason kept verbatim
    #[error("{reason}")]
    Reverted {
        /// Reason string as reported by the node
        reason: String,
    },

    /// Argument rejected before reaching the adapter
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Adapter answered with data of the wrong shape
    #[error("Failed to decode {function} output: {reason}")]
    Decode {
        /// Adapter function whose output was malformed
        function: String,
        /// What was wrong with it
        reason: String,
    },

    /// ABI definition or encoding failure
    #[error("ABI error: {0}")]
    Abi(#[from] ethabi::Error),

    /// Every endpoint failed without an adapter answer
    #[error("Transport error: {0}")]
    Transport(String),

    /// Deployed adapter reports a different spender than configured
    #[error("Router mismatch: expected {expected:?}, adapter reports {actual:?}")]
    RouterMismatch {
        /// Router from configuration
        expected: Address,
        /// Router returned by `getSpenderAddress`
        actual: Address,
    },
}

impl AdapterError {
    /// Map a decoded revert reason to its error variant
    pub fn from_revert_reason(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        match reason.as_str() {
            NO_POOL_FOUND => Self::InvalidPool,
            POOL_TOKEN_MISMATCH => Self::PoolTokenMismatch,
            SINGLE_ASSET_UNSUPPORTED => Self::UnsupportedSingleAsset,
            _ => Self::Reverted { reason },
        }
    }

    /// Verbatim revert reason, if this error came from the adapter
    pub fn revert_reason(&self) -> Option<&str> {
        match self {
            Self::InvalidPool => Some(NO_POOL_FOUND),
            Self::PoolTokenMismatch => Some(POOL_TOKEN_MISMATCH),
            Self::UnsupportedSingleAsset => Some(SINGLE_ASSET_UNSUPPORTED),
            Self::Reverted { reason } => Some(reason),
            _ => None,
        }
    }

    pub fn is_revert(&self) -> bool {
        self.revert_reason().is_some()
    }
}
