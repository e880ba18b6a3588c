//! Behaviour tests for the UniswapAmmAdapter client
//!
//! The scripted suite replays mainnet-fork answers in process. The live
//! suite needs a node serving a fork at block 11095000 with the adapter
//! deployed:
//!
//! ```text
//! ADAPTER_RPC_URL=http://127.0.0.1:8545 ADAPTER_ADDRESS=0x... \
//!     cargo test -p uniswap-amm-adapter --test adapter_behaviour -- --ignored
//! ```

mod common;

use common::*;
use uniswap_amm_adapter::{AdapterClient, AdapterError, Calldata, ClientConfig};
use web3::types::Address;

#[tokio::test]
async fn test_provide_liquidity_calldata() {
    let (client, _) = fork_client();

    let calldata = client
        .get_provide_liquidity_calldata(addr(POOL), token_pair(), amounts(), min_amount())
        .await
        .unwrap();

    assert_eq!(calldata.clone().into_tokens().len(), Calldata::ARITY);
    assert_eq!(calldata.target, addr(UNISWAP_V2_ROUTER_02));
}

#[tokio::test]
async fn test_remove_liquidity_calldata() {
    let (client, _) = fork_client();

    let calldata = client
        .get_remove_liquidity_calldata(addr(POOL), token_pair(), amounts(), min_amount())
        .await
        .unwrap();

    assert_eq!(calldata.into_tokens().len(), Calldata::ARITY);
}

#[tokio::test]
async fn test_invalid_pool_reverts_both_liquidity_calls() {
    let (client, _) = fork_client();

    let provide = client
        .get_provide_liquidity_calldata(addr(INVALID_POOL), token_pair(), amounts(), min_amount())
        .await
        .unwrap_err();
    assert!(matches!(provide, AdapterError::InvalidPool));
    assert_eq!(provide.to_string(), "No pool found for token pair");

    let remove = client
        .get_remove_liquidity_calldata(addr(INVALID_POOL), token_pair(), amounts(), min_amount())
        .await
        .unwrap_err();
    assert_eq!(remove.to_string(), "No pool found for token pair");
}

#[tokio::test]
async fn test_non_matching_pool_reverts_both_liquidity_calls() {
    let (client, _) = fork_client();

    let provide = client
        .get_provide_liquidity_calldata(
            addr(NON_MATCHING_POOL),
            token_pair(),
            amounts(),
            min_amount(),
        )
        .await
        .unwrap_err();
    assert!(matches!(provide, AdapterError::PoolTokenMismatch));
    assert_eq!(provide.to_string(), "Pool does not match token pair");

    let remove = client
        .get_remove_liquidity_calldata(
            addr(NON_MATCHING_POOL),
            token_pair(),
            amounts(),
            min_amount(),
        )
        .await
        .unwrap_err();
    assert_eq!(remove.to_string(), "Pool does not match token pair");
}

#[tokio::test]
async fn test_single_asset_calls_always_revert() {
    let (client, _) = fork_client();

    for pool in [POOL, INVALID_POOL] {
        let provide = client
            .get_provide_liquidity_single_asset_calldata(
                addr(pool),
                addr(WETH),
                amounts().amount_a,
                min_amount(),
            )
            .await
            .unwrap_err();
        assert_eq!(provide.to_string(), "Uniswap pools require a token pair");

        let remove = client
            .get_remove_liquidity_single_asset_calldata(
                addr(pool),
                addr(WETH),
                amounts().amount_a,
                min_amount(),
            )
            .await
            .unwrap_err();
        assert!(matches!(remove, AdapterError::UnsupportedSingleAsset));
    }
}

#[tokio::test]
async fn test_spender_is_router() {
    let (client, _) = fork_client();

    let router = client.get_spender_address(Address::zero()).await.unwrap();
    assert_eq!(router, addr(UNISWAP_V2_ROUTER_02));

    // Any input answers the same
    let router = client.get_spender_address(addr(POOL)).await.unwrap();
    assert_eq!(router, addr(UNISWAP_V2_ROUTER_02));

    client.verify_router(addr(UNISWAP_V2_ROUTER_02)).await.unwrap();
}

#[tokio::test]
async fn test_is_valid_pool() {
    let (client, _) = fork_client();

    assert!(client.is_valid_pool(addr(POOL)).await.unwrap());
    assert!(!client.is_valid_pool(addr(INVALID_POOL)).await.unwrap());
}

#[tokio::test]
async fn test_queries_are_pinned_to_fork_block() {
    let (client, transport) = fork_client();

    client.is_valid_pool(addr(POOL)).await.unwrap();
    client.get_spender_address(Address::zero()).await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.block == Some(11_095_000)));
    assert!(calls.iter().all(|c| c.to == addr(ADAPTER)));
}

#[tokio::test]
async fn test_queries_are_idempotent() {
    let (client, _) = fork_client();

    let first = client
        .get_provide_liquidity_calldata(addr(POOL), token_pair(), amounts(), min_amount())
        .await
        .unwrap();
    let second = client
        .get_provide_liquidity_calldata(addr(POOL), token_pair(), amounts(), min_amount())
        .await
        .unwrap();
    assert_eq!(first, second);
}

fn live_client() -> Option<AdapterClient> {
    let rpc = std::env::var("ADAPTER_RPC_URL").ok()?;
    let adapter = std::env::var("ADAPTER_ADDRESS").ok()?;

    let config = ClientConfig {
        adapter_address: addr(&adapter),
        primary_rpc: rpc,
        ..Default::default()
    };
    Some(AdapterClient::from_config(&config).expect("Failed to create client"))
}

#[tokio::test]
#[ignore] // Run with --ignored against a mainnet fork
async fn test_live_fork_adapter() {
    let Some(client) = live_client() else {
        println!("ADAPTER_RPC_URL / ADAPTER_ADDRESS not set, skipping");
        return;
    };

    let calldata = client
        .get_provide_liquidity_calldata(addr(POOL), token_pair(), amounts(), min_amount())
        .await
        .unwrap();
    assert_eq!(calldata.into_tokens().len(), Calldata::ARITY);

    let err = client
        .get_remove_liquidity_calldata(addr(INVALID_POOL), token_pair(), amounts(), min_amount())
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::InvalidPool));

    let err = client
        .get_provide_liquidity_calldata(
            addr(NON_MATCHING_POOL),
            token_pair(),
            amounts(),
            min_amount(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::PoolTokenMismatch));

    let err = client
        .get_provide_liquidity_single_asset_calldata(
            addr(POOL),
            addr(WETH),
            amounts().amount_a,
            min_amount(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::UnsupportedSingleAsset));

    assert_eq!(
        client.get_spender_address(Address::zero()).await.unwrap(),
        addr(UNISWAP_V2_ROUTER_02)
    );
    assert!(client.is_valid_pool(addr(POOL)).await.unwrap());
    assert!(!client.is_valid_pool(addr(INVALID_POOL)).await.unwrap());
}
