/*
[INPUT]:  Mock auth and plugin SDKs standing in for the browser vendors
[OUTPUT]: The complete session lifecycle played out on the console
[POS]:    Examples - session lifecycle demonstration
[UPDATE]: When the lifecycle or binder flow changes
*/

use std::sync::Arc;

use serde_json::json;
use web3session::*;

/// Example: full session flow
///
/// This example demonstrates the complete lifecycle:
/// 1. Wire the console, session manager, and plugin binder
/// 2. Initialize the auth client
/// 3. Log in; the binder attaches the wallet plugin on connect
/// 4. Run chain queries, signing, and the plugin top-up
/// 5. Log out and watch dependent actions refuse politely
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Web3 Session Demo ===\n");

    // A canned provider stands in for the wallet RPC endpoint
    let provider = Arc::new(
        MockProvider::new()
            .with_response("eth_chainId", json!("0xaa36a7"))
            .with_response(
                "eth_accounts",
                json!(["0xabc0000000000000000000000000000000000001"]),
            )
            .with_response("eth_getBalance", json!("0xde0b6b3a7640000"))
            .with_response("personal_sign", json!("0xdemo_signature"))
            .with_response("eth_sendTransaction", json!("0xdemo_tx_hash")),
    );
    let client = Arc::new(MockAuthClient::new().with_provider(provider));

    let console = Console::new();
    let manager = SessionManager::new(Arc::new(MockAuthSdk::new(client)), console.clone());

    let plugin_sdk = Arc::new(MockPluginSdk::new(Arc::new(MockWalletPlugin::new())));
    let binder = Arc::new(PluginBinder::new(
        manager.session(),
        plugin_sdk,
        PluginConfig::default(),
        console.clone(),
    ));
    let watcher = tokio::spawn({
        let binder = binder.clone();
        async move { binder.run().await }
    });
    println!("✓ manager and binder wired");

    // Actions before initialize refuse with a console notice
    manager.query_chain_id().await;
    println!("  before init: {}", console.last().unwrap_or_default());

    let config = SessionConfig::new("demo-client-id", ChainConfig::sepolia());
    let session = manager.initialize(config).await;
    println!("✓ initialized, phase: {:?}", session.phase());

    if manager.login().await.is_none() {
        eprintln!("login failed");
        return;
    }
    let _ = watcher.await;
    println!("✓ logged in, plugin bound: {}", binder.is_bound().await);

    manager.query_chain_id().await;
    println!("  chain id: {}", console.last().unwrap_or_default());

    manager.query_accounts().await;
    println!("  accounts: {}", console.last().unwrap_or_default());

    manager.query_balance().await;
    println!("  balance (ether): {}", console.last().unwrap_or_default());

    manager.sign_message("hello from the demo").await;
    println!("  signature: {}", console.last().unwrap_or_default());

    binder.top_up(TopUpParams::default()).await;
    println!("✓ top-up initiated for the session's first account");

    manager.logout().await;
    println!("✓ logged out, phase: {:?}", session.phase());

    manager.query_balance().await;
    println!("  after logout: {}", console.last().unwrap_or_default());

    println!("\n✓ Session demo complete");
}
