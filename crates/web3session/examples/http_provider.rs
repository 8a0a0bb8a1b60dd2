/*
[INPUT]:  A JSON-RPC endpoint URL and optionally an account address
[OUTPUT]: Chain id and balance read over plain HTTP
[POS]:    Examples - HTTP provider demonstration
[UPDATE]: When transport options or facade methods change
*/

use std::sync::Arc;

use web3session::{EthRpc, HttpProvider};

/// Example: chain queries over a real JSON-RPC endpoint
///
/// Usage: cargo run --example http_provider [endpoint] [address]
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://rpc.sepolia.org".to_string());
    let address = std::env::args().nth(2);

    println!("=== HTTP Provider Example ===\n");
    println!("endpoint: {endpoint}");

    let provider = match HttpProvider::new(&endpoint) {
        Ok(p) => Arc::new(p),
        Err(e) => {
            eprintln!("failed to create provider: {e}");
            return;
        }
    };
    let rpc = EthRpc::new(provider);

    match rpc.chain_id().await {
        Ok(chain_id) => println!("✓ chain id: {chain_id} (0x{chain_id:x})"),
        Err(e) => {
            eprintln!("chain id query failed: {e}");
            return;
        }
    }

    if let Some(address) = address {
        match rpc.balance_ether(&address).await {
            Ok(balance) => println!("✓ balance of {address}: {balance} ETH"),
            Err(e) => eprintln!("balance query failed: {e}"),
        }
    } else {
        println!("\npass an address as the second argument to read a balance");
    }

    println!("\n✓ HTTP provider example complete");
}
