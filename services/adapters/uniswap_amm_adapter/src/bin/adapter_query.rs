//! Adapter Query CLI
//!
//! Issues read-only queries against a deployed UniswapAmmAdapter from the
//! command line. Secrets (`ALCHEMY_API_KEY`, `TEST_ACCOUNT_PK`) are read from
//! the environment or a `.env` file.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use adapter_config::{load_config, ToolchainConfig};
use uniswap_amm_adapter::{
    parse_address, parse_amount, AdapterClient, AmountPair, ClientConfig, TokenPair,
};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "adapter_query")]
#[command(about = "Query a deployed UniswapAmmAdapter")]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Network profile (hardhat, ropsten, kovan, ...)
    #[arg(short, long)]
    network: Option<String>,

    /// Adapter address, overrides configuration
    #[arg(short, long)]
    adapter: Option<String>,

    /// Info-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Debug-level logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Query(QueryCommand),
    /// List network profiles
    Networks,
    /// List compiler profiles
    Compilers,
}

/// Commands that talk to the adapter
#[derive(Subcommand, Debug)]
enum QueryCommand {
    /// Calldata to provide liquidity to a pool
    Provide(PairArgs),
    /// Calldata to remove liquidity from a pool
    Remove(PairArgs),
    /// Calldata to provide single-asset liquidity
    ProvideSingle(SingleArgs),
    /// Calldata to remove single-asset liquidity
    RemoveSingle(SingleArgs),
    /// Spender (router) address
    Spender {
        /// Token or pool address; ignored by Uniswap adapters
        #[arg(default_value = "0x0000000000000000000000000000000000000000")]
        address: String,
    },
    /// Whether an address is a recognised pool
    IsValidPool {
        pool: String,
    },
    /// Check the adapter's spender against the configured router
    VerifyRouter,
}

#[derive(Args, Debug)]
struct PairArgs {
    #[arg(long)]
    pool: String,
    #[arg(long)]
    token_a: String,
    #[arg(long)]
    token_b: String,
    #[arg(long)]
    amount_a: String,
    #[arg(long)]
    amount_b: String,
    /// Minimum liquidity (provide) or liquidity to burn (remove)
    #[arg(long)]
    min: String,
}

#[derive(Args, Debug)]
struct SingleArgs {
    #[arg(long)]
    pool: String,
    #[arg(long)]
    token: String,
    #[arg(long)]
    amount: String,
    #[arg(long)]
    min: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, debug: bool) {
    let default_level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let toolchain = load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    let query = match cli.command {
        Command::Networks => return list_networks(&toolchain),
        Command::Compilers => return list_compilers(&toolchain),
        Command::Query(query) => query,
    };

    let network_name = cli
        .network
        .unwrap_or_else(|| toolchain.default_network.clone());
    let network = toolchain.network(&network_name)?;
    let config = ClientConfig::from_profile(&toolchain, &network, cli.adapter.as_deref())?;

    info!("Querying adapter {:?} on '{}'", config.adapter_address, network.name);
    let client = AdapterClient::from_config(&config)?;

    match query {
        QueryCommand::Provide(args) => {
            let (pool, tokens, amounts, min) = pair_args(&args)?;
            let calldata = client
                .get_provide_liquidity_calldata(pool, tokens, amounts, min)
                .await?;
            println!("{}", serde_json::to_string_pretty(&calldata)?);
        }
        QueryCommand::Remove(args) => {
            let (pool, tokens, amounts, min) = pair_args(&args)?;
            let calldata = client
                .get_remove_liquidity_calldata(pool, tokens, amounts, min)
                .await?;
            println!("{}", serde_json::to_string_pretty(&calldata)?);
        }
        QueryCommand::ProvideSingle(args) => {
            let calldata = client
                .get_provide_liquidity_single_asset_calldata(
                    parse_address(&args.pool)?,
                    parse_address(&args.token)?,
                    parse_amount(&args.amount)?,
                    parse_amount(&args.min)?,
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&calldata)?);
        }
        QueryCommand::RemoveSingle(args) => {
            let calldata = client
                .get_remove_liquidity_single_asset_calldata(
                    parse_address(&args.pool)?,
                    parse_address(&args.token)?,
                    parse_amount(&args.amount)?,
                    parse_amount(&args.min)?,
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&calldata)?);
        }
        QueryCommand::Spender { address } => {
            let spender = client.get_spender_address(parse_address(&address)?).await?;
            println!("{:?}", spender);
        }
        QueryCommand::IsValidPool { pool } => {
            let valid = client.is_valid_pool(parse_address(&pool)?).await?;
            println!("{}", valid);
        }
        QueryCommand::VerifyRouter => {
            client.verify_router(config.router).await?;
            println!("adapter spends through {:?}", config.router);
        }
    }

    Ok(())
}

fn pair_args(
    args: &PairArgs,
) -> Result<(web3::types::Address, TokenPair, AmountPair, web3::types::U256)> {
    Ok((
        parse_address(&args.pool)?,
        TokenPair::new(parse_address(&args.token_a)?, parse_address(&args.token_b)?),
        AmountPair::from_dec_strs(&args.amount_a, &args.amount_b)?,
        parse_amount(&args.min)?,
    ))
}

fn list_networks(toolchain: &ToolchainConfig) -> Result<()> {
    for (name, settings) in &toolchain.networks {
        let marker = if *name == toolchain.default_network { "*" } else { " " };
        let fork = settings
            .fork_block
            .map(|b| format!("fork @ {}", b))
            .unwrap_or_else(|| "live".to_string());
        println!(
            "{} {:<10} chain {:<6} {:<16} accounts: {}",
            marker,
            name,
            settings
                .chain_id
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            fork,
            settings.accounts.len()
        );
    }
    Ok(())
}

fn list_compilers(toolchain: &ToolchainConfig) -> Result<()> {
    for profile in &toolchain.compilers {
        let settings = if profile.uses_default_settings() {
            "default settings".to_string()
        } else {
            serde_json::to_string(&profile.settings)?
        };
        println!("solc {:<8} {}", profile.version, settings);
    }
    Ok(())
}
