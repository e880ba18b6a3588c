//! Shared fixtures for adapter behaviour tests
//!
//! Mainnet addresses as of block 11095000, and a scripted adapter that
//! answers the way the deployed contract does for them.

#![allow(dead_code)]

use ethabi::Token;
use std::collections::HashMap;
use std::sync::Arc;
use uniswap_amm_adapter::abi::{functions, AdapterAbi};
use uniswap_amm_adapter::error::{NO_POOL_FOUND, POOL_TOKEN_MISMATCH, SINGLE_ASSET_UNSUPPORTED};
use uniswap_amm_adapter::testing::ScriptedTransport;
use uniswap_amm_adapter::{parse_address, AdapterClient, AmountPair, CallError, EthCall, TokenPair};
use web3::types::{Address, U256};

pub const WETH: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";
pub const YAM: &str = "0x0aacfbec6a24756c20d41914f2caba817c0d8521";
pub const UMA: &str = "0x04Fa0d235C4abf4BcF4787aF4CF447DE572eF828";

/// WETH-YAM liquidity pool
pub const POOL: &str = "0xe2aAb7232a9545F29112f9e6441661fD6eEB0a5d";
/// WETH-UMA liquidity pool
pub const NON_MATCHING_POOL: &str = "0x88D97d199b9ED37C29D846d00D443De980832a22";
/// A wallet address
pub const INVALID_POOL: &str = "0x15abb66ba754f05cbc0165a64a11cded1543de48";

pub const UNISWAP_V2_ROUTER_02: &str = "0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D";
pub const UNISWAP_V2_FACTORY: &str = "0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f";

pub const ADAPTER: &str = "0x00000000000000000000000000000000000a11ce";

pub fn addr(value: &str) -> Address {
    parse_address(value).unwrap()
}

pub fn token_pair() -> TokenPair {
    TokenPair::new(addr(WETH), addr(YAM))
}

pub fn amounts() -> AmountPair {
    AmountPair::from_dec_strs("1000000000000000", "1000000000000000000").unwrap()
}

pub fn min_amount() -> U256 {
    U256::from_dec_str("2000000000000000000").unwrap()
}

/// Scripted adapter deployed with the mainnet router and factory
pub struct ForkAdapter {
    abi: AdapterAbi,
    router: Address,
    pools: HashMap<Address, TokenPair>,
}

impl ForkAdapter {
    pub fn mainnet() -> Self {
        let mut pools = HashMap::new();
        pools.insert(addr(POOL), TokenPair::new(addr(WETH), addr(YAM)));
        pools.insert(addr(NON_MATCHING_POOL), TokenPair::new(addr(WETH), addr(UMA)));

        Self {
            abi: AdapterAbi::load().unwrap(),
            router: addr(UNISWAP_V2_ROUTER_02),
            pools,
        }
    }

    pub fn answer(&self, call: &EthCall) -> Result<Vec<u8>, CallError> {
        let name = self
            .abi
            .function_for_selector(&call.data)
            .ok_or_else(|| CallError::Reverted {
                message: "execution reverted".to_string(),
                data: None,
            })?;
        let args = self.abi.decode_call(name, &call.data).unwrap();

        let output = match name {
            functions::GET_PROVIDE_LIQUIDITY_CALLDATA | functions::GET_REMOVE_LIQUIDITY_CALLDATA => {
                let pool = as_address(&args[0]);
                let tokens = match &args[1] {
                    Token::Array(items) => {
                        let items: Vec<Address> = items.iter().map(as_address).collect();
                        TokenPair::from_slice(&items).unwrap()
                    }
                    other => panic!("unexpected token list {:?}", other),
                };

                match self.pools.get(&pool) {
                    None => return Err(CallError::revert_with_reason(NO_POOL_FOUND)),
                    Some(pool_tokens) if !pool_tokens.same_tokens(&tokens) => {
                        return Err(CallError::revert_with_reason(POOL_TOKEN_MISMATCH))
                    }
                    Some(_) => vec![
                        Token::Address(self.router),
                        Token::Uint(U256::zero()),
                        Token::Bytes(call.data[4..].to_vec()),
                    ],
                }
            }
            functions::GET_PROVIDE_LIQUIDITY_SINGLE_ASSET_CALLDATA
            | functions::GET_REMOVE_LIQUIDITY_SINGLE_ASSET_CALLDATA => {
                return Err(CallError::revert_with_reason(SINGLE_ASSET_UNSUPPORTED))
            }
            functions::GET_SPENDER_ADDRESS => vec![Token::Address(self.router)],
            functions::IS_VALID_POOL => {
                vec![Token::Bool(self.pools.contains_key(&as_address(&args[0])))]
            }
            other => panic!("unexpected function {}", other),
        };

        Ok(self.abi.encode_output(name, &output).unwrap())
    }
}

fn as_address(token: &Token) -> Address {
    match token {
        Token::Address(address) => *address,
        other => panic!("expected address, got {:?}", other),
    }
}

/// Client wired to a scripted mainnet-fork adapter
pub fn fork_client() -> (AdapterClient, Arc<ScriptedTransport>) {
    let adapter = ForkAdapter::mainnet();
    let transport = ScriptedTransport::new(move |call| adapter.answer(call)).into_shared();
    let client = AdapterClient::new(addr(ADAPTER), transport.clone())
        .unwrap()
        .at_block(11_095_000);
    (client, transport)
}
