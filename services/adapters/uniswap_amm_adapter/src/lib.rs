//! Uniswap AMM Adapter Client
//!
//! Read-only client for a deployed `UniswapAmmAdapter` contract. The adapter
//! is constructed on-chain with a Uniswap V2 router and factory and answers
//! six queries; this crate encodes those queries, sends them as `eth_call`s
//! and turns the answers (or the adapter's revert reasons) into Rust types.
//!
//! Features:
//! - Typed wrappers for all six adapter queries
//! - Revert reason decoding across node flavours (geth, Hardhat, Ganache)
//! - HTTP transport with fallback endpoints, timeouts and fork-block pinning
//! - In-process scripted transport for offline testing

pub mod abi;
pub mod calldata;
pub mod client;
pub mod config;
pub mod error;
pub mod revert;
pub mod testing;
pub mod transport;

pub use calldata::{parse_address, parse_amount, AmountPair, Calldata, TokenPair};
pub use client::AdapterClient;
pub use config::ClientConfig;
pub use error::{AdapterError, Result};
pub use transport::{CallError, CallTransport, EthCall, Web3Transport};
