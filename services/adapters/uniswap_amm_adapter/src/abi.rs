//! UniswapAmmAdapter ABI
//!
//! Canonical ABI for the six read-only adapter queries. Inputs are encoded
//! and outputs decoded through `ethabi`.

use ethabi::{Contract, Function, Token};

use crate::error::{AdapterError, Result};

/// Adapter function names
pub mod functions {
    pub const GET_PROVIDE_LIQUIDITY_CALLDATA: &str = "getProvideLiquidityCalldata";
    pub const GET_REMOVE_LIQUIDITY_CALLDATA: &str = "getRemoveLiquidityCalldata";
    pub const GET_PROVIDE_LIQUIDITY_SINGLE_ASSET_CALLDATA: &str =
        "getProvideLiquiditySingleAssetCalldata";
    pub const GET_REMOVE_LIQUIDITY_SINGLE_ASSET_CALLDATA: &str =
        "getRemoveLiquiditySingleAssetCalldata";
    pub const GET_SPENDER_ADDRESS: &str = "getSpenderAddress";
    pub const IS_VALID_POOL: &str = "isValidPool";

    /// Every function the adapter exposes
    pub const ALL: [&str; 6] = [
        GET_PROVIDE_LIQUIDITY_CALLDATA,
        GET_REMOVE_LIQUIDITY_CALLDATA,
        GET_PROVIDE_LIQUIDITY_SINGLE_ASSET_CALLDATA,
        GET_REMOVE_LIQUIDITY_SINGLE_ASSET_CALLDATA,
        GET_SPENDER_ADDRESS,
        IS_VALID_POOL,
    ];
}

/// Calldata-returning functions answer `(address, uint256, bytes)`
const CALLDATA_OUTPUTS: &str = r#"[
    {"name":"","type":"address"},
    {"name":"","type":"uint256"},
    {"name":"","type":"bytes"}
]"#;

/// Adapter ABI. `__CALLDATA_OUTPUTS__` is replaced with [`CALLDATA_OUTPUTS`].
const ADAPTER_ABI_TEMPLATE: &str = r#"[
    {"type":"function","name":"getProvideLiquidityCalldata","stateMutability":"view",
     "inputs":[{"name":"_pool","type":"address"},{"name":"_components","type":"address[]"},
               {"name":"_maxTokensIn","type":"uint256[]"},{"name":"_minLiquidity","type":"uint256"}],
     "outputs":__CALLDATA_OUTPUTS__},
    {"type":"function","name":"getRemoveLiquidityCalldata","stateMutability":"view",
     "inputs":[{"name":"_pool","type":"address"},{"name":"_components","type":"address[]"},
               {"name":"_minTokensOut","type":"uint256[]"},{"name":"_liquidity","type":"uint256"}],
     "outputs":__CALLDATA_OUTPUTS__},
    {"type":"function","name":"getProvideLiquiditySingleAssetCalldata","stateMutability":"view",
     "inputs":[{"name":"_pool","type":"address"},{"name":"_component","type":"address"},
               {"name":"_maxTokenIn","type":"uint256"},{"name":"_minLiquidity","type":"uint256"}],
     "outputs":__CALLDATA_OUTPUTS__},
    {"type":"function","name":"getRemoveLiquiditySingleAssetCalldata","stateMutability":"view",
     "inputs":[{"name":"_pool","type":"address"},{"name":"_component","type":"address"},
               {"name":"_minTokenOut","type":"uint256"},{"name":"_liquidity","type":"uint256"}],
     "outputs":__CALLDATA_OUTPUTS__},
    {"type":"function","name":"getSpenderAddress","stateMutability":"view",
     "inputs":[{"name":"_pool","type":"address"}],
     "outputs":[{"name":"","type":"address"}]},
    {"type":"function","name":"isValidPool","stateMutability":"view",
     "inputs":[{"name":"_pool","type":"address"}],
     "outputs":[{"name":"","type":"bool"}]}
]"#;

/// Adapter ABI as JSON
pub fn adapter_abi_json() -> String {
    ADAPTER_ABI_TEMPLATE.replace("__CALLDATA_OUTPUTS__", CALLDATA_OUTPUTS)
}

/// Parsed adapter ABI
#[derive(Debug, Clone)]
pub struct AdapterAbi {
    contract: Contract,
}

impl AdapterAbi {
    pub fn load() -> Result<Self> {
        let contract = Contract::load(adapter_abi_json().as_bytes())?;
        Ok(Self { contract })
    }

    pub fn function(&self, name: &str) -> Result<&Function> {
        Ok(self.contract.function(name)?)
    }

    /// 4-byte selector of a function
    pub fn selector(&self, name: &str) -> Result<[u8; 4]> {
        Ok(self.function(name)?.short_signature())
    }

    /// Full call data: selector followed by encoded arguments
    pub fn encode_call(&self, name: &str, args: &[Token]) -> Result<Vec<u8>> {
        Ok(self.function(name)?.encode_input(args)?)
    }

    /// Decode a call's arguments (the inverse of [`encode_call`](Self::encode_call))
    pub fn decode_call(&self, name: &str, call_data: &[u8]) -> Result<Vec<Token>> {
        let function = self.function(name)?;
        if call_data.len() < 4 || call_data[..4] != function.short_signature() {
            return Err(AdapterError::Decode {
                function: name.to_string(),
                reason: "call data does not start with the function selector".to_string(),
            });
        }
        Ok(function.decode_input(&call_data[4..])?)
    }

    /// Decode a function's return data
    pub fn decode_output(&self, name: &str, output: &[u8]) -> Result<Vec<Token>> {
        self.function(name)?
            .decode_output(output)
            .map_err(|e| AdapterError::Decode {
                function: name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Encode return values, as the adapter would
    pub fn encode_output(&self, name: &str, values: &[Token]) -> Result<Vec<u8>> {
        // Validate against the declared outputs before encoding
        let function = self.function(name)?;
        let kinds: Vec<_> = function.outputs.iter().map(|p| p.kind.clone()).collect();
        if !Token::types_check(values, &kinds) {
            return Err(AdapterError::InvalidArgument(format!(
                "{} returns {} values of different types",
                name,
                kinds.len()
            )));
        }
        Ok(ethabi::encode(values))
    }

    /// Which adapter function a call data blob targets
    pub fn function_for_selector(&self, call_data: &[u8]) -> Option<&'static str> {
        if call_data.len() < 4 {
            return None;
        }
        functions::ALL.iter().copied().find(|name| {
            self.function(name)
                .map(|f| call_data[..4] == f.short_signature())
                .unwrap_or(false)
        })
    }
}
