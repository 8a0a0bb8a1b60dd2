/*
[INPUT]:  Session transitions driven through the manager with mock SDKs
[OUTPUT]: Test results for plugin binding and plugin actions
[POS]:    Integration tests - wallet plugin binder
[UPDATE]: When bind triggers or plugin flows change
*/

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{test_config, wallet_provider, TEST_ADDRESS};
use tokio::task::JoinHandle;
use web3session::{
    BindTrigger, Console, MockAuthClient, MockAuthSdk, MockPluginSdk, MockWalletPlugin,
    PluginBinder, PluginConfig, Provider, SessionManager, SessionPhase, TopUpParams,
};

struct Harness {
    manager: SessionManager,
    binder: Arc<PluginBinder>,
    plugin: Arc<MockWalletPlugin>,
    plugin_sdk: Arc<MockPluginSdk>,
    watcher: JoinHandle<()>,
}

/// Wire a manager and a watching binder around shared mocks, the way
/// the demo application boots.
fn spawn_harness(client: Arc<MockAuthClient>, plugin: Arc<MockWalletPlugin>, trigger: BindTrigger) -> Harness {
    let console = Console::new();
    let manager = SessionManager::new(Arc::new(MockAuthSdk::new(client)), console.clone());
    let plugin_sdk = Arc::new(MockPluginSdk::new(plugin.clone()));
    let binder = Arc::new(PluginBinder::new(
        manager.session(),
        plugin_sdk.clone(),
        PluginConfig::default().with_trigger(trigger),
        console,
    ));
    let watcher = tokio::spawn({
        let binder = binder.clone();
        async move { binder.run().await }
    });
    Harness {
        manager,
        binder,
        plugin,
        plugin_sdk,
        watcher,
    }
}

async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_binds_after_login_with_default_trigger() {
    let harness = spawn_harness(
        Arc::new(MockAuthClient::new().with_provider(Arc::new(wallet_provider()))),
        Arc::new(MockWalletPlugin::new()),
        BindTrigger::ProviderConnected,
    );

    harness.manager.initialize(test_config()).await;
    settle().await;
    assert!(!harness.binder.is_bound().await);
    assert_eq!(harness.plugin_sdk.build_calls(), 0);

    harness.manager.login().await;
    tokio::time::timeout(Duration::from_secs(1), harness.watcher)
        .await
        .unwrap()
        .unwrap();

    assert!(harness.binder.is_bound().await);
    assert_eq!(harness.plugin_sdk.build_calls(), 1);
}

#[tokio::test]
async fn test_client_ready_trigger_binds_before_login() {
    let harness = spawn_harness(
        Arc::new(MockAuthClient::new().with_provider(Arc::new(wallet_provider()))),
        Arc::new(MockWalletPlugin::new()),
        BindTrigger::ClientReady,
    );

    harness.manager.initialize(test_config()).await;
    tokio::time::timeout(Duration::from_secs(1), harness.watcher)
        .await
        .unwrap()
        .unwrap();

    assert!(harness.binder.is_bound().await);
    // client is not connected and the plugin brings no proxy, so there
    // is no provider to adopt
    assert_eq!(harness.manager.session().phase(), SessionPhase::Ready);
    assert!(harness.manager.session().provider().is_none());

    assert!(harness.manager.login().await.is_some());
    assert!(harness.manager.query_accounts().await.is_some());
}

#[tokio::test]
async fn test_repeated_transitions_bind_once() {
    let harness = spawn_harness(
        Arc::new(MockAuthClient::new().with_provider(Arc::new(wallet_provider()))),
        Arc::new(MockWalletPlugin::new()),
        BindTrigger::ProviderConnected,
    );

    harness.manager.initialize(test_config()).await;
    harness.manager.login().await;
    tokio::time::timeout(Duration::from_secs(1), harness.watcher)
        .await
        .unwrap()
        .unwrap();

    harness.manager.logout().await;
    harness.manager.login().await;
    settle().await;

    assert!(!harness.binder.bind().await);
    assert_eq!(harness.plugin_sdk.build_calls(), 1);
}

#[tokio::test]
async fn test_adopted_proxy_provider_serves_queries() {
    let proxy = Arc::new(wallet_provider());
    let harness = spawn_harness(
        Arc::new(MockAuthClient::new()),
        Arc::new(MockWalletPlugin::new().with_proxy_provider(proxy.clone())),
        BindTrigger::ClientReady,
    );

    harness.manager.initialize(test_config()).await;
    tokio::time::timeout(Duration::from_secs(1), harness.watcher)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(harness.manager.session().phase(), SessionPhase::Connected);
    let adopted = harness.manager.session().provider().unwrap();
    assert!(Arc::ptr_eq(&adopted, &(proxy.clone() as Arc<dyn Provider>)));

    let accounts = harness.manager.query_accounts().await.unwrap();
    assert_eq!(accounts[0], TEST_ADDRESS);
    assert_eq!(proxy.call_count("eth_accounts"), 1);
}

#[tokio::test]
async fn test_top_up_reaches_ramp_with_session_address() {
    let harness = spawn_harness(
        Arc::new(MockAuthClient::new().with_provider(Arc::new(wallet_provider()))),
        Arc::new(MockWalletPlugin::new()),
        BindTrigger::ProviderConnected,
    );

    harness.manager.initialize(test_config()).await;
    harness.manager.login().await;
    tokio::time::timeout(Duration::from_secs(1), harness.watcher)
        .await
        .unwrap()
        .unwrap();

    harness.binder.top_up(TopUpParams::default()).await;

    let topups = harness.plugin.topups();
    assert_eq!(topups.len(), 1);
    assert_eq!(topups[0].1.selected_address, TEST_ADDRESS);
    assert_eq!(topups[0].1.chain_network, "optimism_mainnet");
}

#[tokio::test]
async fn test_top_up_before_login_never_reaches_ramp() {
    let harness = spawn_harness(
        Arc::new(MockAuthClient::new()),
        Arc::new(MockWalletPlugin::new()),
        BindTrigger::ClientReady,
    );

    harness.manager.initialize(test_config()).await;
    tokio::time::timeout(Duration::from_secs(1), harness.watcher)
        .await
        .unwrap()
        .unwrap();

    harness.binder.top_up(TopUpParams::default()).await;

    assert_eq!(
        harness.manager.console().last().as_deref(),
        Some("provider not initialized yet")
    );
    assert!(harness.plugin.topups().is_empty());
}

#[tokio::test]
async fn test_scanner_after_binding_clears_console() {
    let harness = spawn_harness(
        Arc::new(MockAuthClient::new().with_provider(Arc::new(wallet_provider()))),
        Arc::new(MockWalletPlugin::new()),
        BindTrigger::ProviderConnected,
    );

    harness.manager.initialize(test_config()).await;
    harness.manager.login().await;
    tokio::time::timeout(Duration::from_secs(1), harness.watcher)
        .await
        .unwrap()
        .unwrap();

    harness.manager.query_chain_id().await;
    assert!(harness.manager.console().last().is_some());

    harness.binder.show_scanner().await;
    assert_eq!(harness.plugin.scanner_calls(), 1);
    assert!(harness.manager.console().last().is_none());
}

#[tokio::test]
async fn test_binding_survives_logout() {
    let harness = spawn_harness(
        Arc::new(MockAuthClient::new().with_provider(Arc::new(wallet_provider()))),
        Arc::new(MockWalletPlugin::new()),
        BindTrigger::ProviderConnected,
    );

    harness.manager.initialize(test_config()).await;
    harness.manager.login().await;
    tokio::time::timeout(Duration::from_secs(1), harness.watcher)
        .await
        .unwrap()
        .unwrap();

    harness.manager.logout().await;
    assert!(harness.binder.is_bound().await);

    // scanner still works while logged out; top-up needs the provider back
    harness.binder.show_scanner().await;
    assert_eq!(harness.plugin.scanner_calls(), 1);

    harness.binder.top_up(TopUpParams::default()).await;
    assert!(harness.plugin.topups().is_empty());
}
