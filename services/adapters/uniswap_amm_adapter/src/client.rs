//! Adapter Query Client
//!
//! Issues the six read-only adapter queries and interprets the answers.
//! Validation of pools and token pairs happens inside the deployed adapter;
//! the client only encodes arguments, decodes results and surfaces the
//! adapter's revert reasons unchanged.

use ethabi::Token;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use web3::types::{Address, U256};

use crate::abi::{functions, AdapterAbi};
use crate::calldata::{AmountPair, Calldata, TokenPair};
use crate::config::ClientConfig;
use crate::error::{AdapterError, Result};
use crate::revert;
use crate::transport::{CallError, CallTransport, EthCall, Web3Transport};

/// Client bound to one deployed adapter
///
/// Holds no mutable state; share it behind an `Arc` for concurrent use.
pub struct AdapterClient {
    /// Deployed adapter address
    adapter: Address,

    abi: AdapterAbi,

    transport: Arc<dyn CallTransport>,

    /// Caller presented to the node
    caller: Option<Address>,

    /// Block all queries execute against
    block: Option<u64>,
}

impl AdapterClient {
    pub fn new(adapter: Address, transport: Arc<dyn CallTransport>) -> Result<Self> {
        Ok(Self {
            adapter,
            abi: AdapterAbi::load()?,
            transport,
            caller: None,
            block: None,
        })
    }

    /// Create a client over HTTP from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = Web3Transport::new(
            &config.primary_rpc,
            &config.fallback_rpcs,
            Duration::from_millis(config.rpc_timeout_ms),
        )?;

        let mut client = Self::new(config.adapter_address, Arc::new(transport))?;
        client.caller = config.caller;
        client.block = config.fork_block;

        info!(
            "Adapter client initialized for {:?} (block: {})",
            client.adapter,
            client
                .block
                .map(|b| b.to_string())
                .unwrap_or_else(|| "latest".to_string())
        );

        Ok(client)
    }

    /// Present `caller` as `from` on every query
    pub fn with_caller(mut self, caller: Address) -> Self {
        self.caller = Some(caller);
        self
    }

    /// Execute every query against `block`
    pub fn at_block(mut self, block: u64) -> Self {
        self.block = Some(block);
        self
    }

    pub fn adapter_address(&self) -> Address {
        self.adapter
    }

    pub fn block(&self) -> Option<u64> {
        self.block
    }

    /// Calldata for providing liquidity to a two-asset pool
    pub async fn get_provide_liquidity_calldata(
        &self,
        pool: Address,
        tokens: TokenPair,
        max_tokens_in: AmountPair,
        min_liquidity: U256,
    ) -> Result<Calldata> {
        self.query_calldata(
            functions::GET_PROVIDE_LIQUIDITY_CALLDATA,
            &[
                Token::Address(pool),
                tokens.to_token(),
                max_tokens_in.to_token(),
                Token::Uint(min_liquidity),
            ],
        )
        .await
    }

    /// Calldata for removing liquidity from a two-asset pool
    pub async fn get_remove_liquidity_calldata(
        &self,
        pool: Address,
        tokens: TokenPair,
        min_tokens_out: AmountPair,
        liquidity: U256,
    ) -> Result<Calldata> {
        self.query_calldata(
            functions::GET_REMOVE_LIQUIDITY_CALLDATA,
            &[
                Token::Address(pool),
                tokens.to_token(),
                min_tokens_out.to_token(),
                Token::Uint(liquidity),
            ],
        )
        .await
    }

    /// Single-asset provide; Uniswap adapters reject it with
    /// [`AdapterError::UnsupportedSingleAsset`]
    pub async fn get_provide_liquidity_single_asset_calldata(
        &self,
        pool: Address,
        token: Address,
        max_token_in: U256,
        min_liquidity: U256,
    ) -> Result<Calldata> {
        self.query_calldata(
            functions::GET_PROVIDE_LIQUIDITY_SINGLE_ASSET_CALLDATA,
            &[
                Token::Address(pool),
                Token::Address(token),
                Token::Uint(max_token_in),
                Token::Uint(min_liquidity),
            ],
        )
        .await
    }

    /// Single-asset remove; Uniswap adapters reject it with
    /// [`AdapterError::UnsupportedSingleAsset`]
    pub async fn get_remove_liquidity_single_asset_calldata(
        &self,
        pool: Address,
        token: Address,
        min_token_out: U256,
        liquidity: U256,
    ) -> Result<Calldata> {
        self.query_calldata(
            functions::GET_REMOVE_LIQUIDITY_SINGLE_ASSET_CALLDATA,
            &[
                Token::Address(pool),
                Token::Address(token),
                Token::Uint(min_token_out),
                Token::Uint(liquidity),
            ],
        )
        .await
    }

    /// Address that must be approved to spend tokens. The argument is
    /// accepted but ignored by Uniswap adapters, which always answer with
    /// their router.
    pub async fn get_spender_address(&self, pool: Address) -> Result<Address> {
        let name = functions::GET_SPENDER_ADDRESS;
        match self.query(name, &[Token::Address(pool)]).await?.as_slice() {
            [Token::Address(spender)] => Ok(*spender),
            other => Err(unexpected_output(name, other)),
        }
    }

    /// Whether `pool` is a pool this adapter recognises
    pub async fn is_valid_pool(&self, pool: Address) -> Result<bool> {
        let name = functions::IS_VALID_POOL;
        match self.query(name, &[Token::Address(pool)]).await?.as_slice() {
            [Token::Bool(valid)] => Ok(*valid),
            other => Err(unexpected_output(name, other)),
        }
    }

    /// Check the deployed adapter spends through `expected`
    pub async fn verify_router(&self, expected: Address) -> Result<()> {
        let actual = self.get_spender_address(Address::zero()).await?;
        if actual != expected {
            return Err(AdapterError::RouterMismatch { expected, actual });
        }
        debug!("Adapter {:?} spends through router {:?}", self.adapter, actual);
        Ok(())
    }

    async fn query_calldata(&self, name: &str, args: &[Token]) -> Result<Calldata> {
        let tokens = self.query(name, args).await?;
        Calldata::from_tokens(name, tokens)
    }

    /// Encode, send and decode one adapter query
    async fn query(&self, name: &str, args: &[Token]) -> Result<Vec<Token>> {
        let call = EthCall {
            to: self.adapter,
            data: self.abi.encode_call(name, args)?,
            from: self.caller,
            block: self.block,
        };

        debug!("Calling {} on adapter {:?}", name, self.adapter);

        let output = self.transport.eth_call(&call).await.map_err(|e| match e {
            CallError::Reverted { message, data } => {
                match revert::extract_reason(&message, data.as_ref()) {
                    Some(reason) => AdapterError::from_revert_reason(reason),
                    None => AdapterError::Reverted { reason: message },
                }
            }
            CallError::Transport(reason) => AdapterError::Transport(reason),
        })?;

        // Some providers return the revert payload as successful output
        if let Some(reason) = revert::decode_error_string(&output) {
            return Err(AdapterError::from_revert_reason(reason));
        }

        if output.is_empty() {
            return Err(AdapterError::Decode {
                function: name.to_string(),
                reason: format!("empty return data (is {:?} the adapter?)", self.adapter),
            });
        }

        self.abi.decode_output(name, &output)
    }
}

fn unexpected_output(function: &str, tokens: &[Token]) -> AdapterError {
    AdapterError::Decode {
        function: function.to_string(),
        reason: format!("unexpected output {:?}", tokens),
    }
}
