/*
[INPUT]:  Plugin configuration, scanner and top-up invocations
[OUTPUT]: Wallet connector plugin handles and the plugin SDK traits
[POS]:    Plugin layer - abstraction over the wallet connector vendor
[UPDATE]: When the plugin surface gains calls or a new vendor is wired in
*/

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;

use crate::rpc::{Provider, Result, SessionError};
use crate::types::{PluginConfig, RampProvider, TopUpRequest};

/// Trait for constructing a wallet connector plugin from configuration
///
/// Implement this trait for your connector vendor. Construction covers
/// theming and feature toggles; the returned plugin is ready to attach.
#[async_trait]
pub trait PluginSdk: Send + Sync {
    /// Build a plugin instance for the given configuration
    async fn build_plugin(&self, config: &PluginConfig) -> Result<Arc<dyn WalletConnectorPlugin>>;
}

/// Trait for an attached wallet connector plugin
#[async_trait]
pub trait WalletConnectorPlugin: Send + Sync {
    /// The plugin's own provider, when it brings one
    fn proxy_provider(&self) -> Option<Arc<dyn Provider>>;

    /// Open the wallet-connect QR scanner UI
    async fn show_wallet_connect_scanner(&self) -> Result<()>;

    /// Start a fiat top-up with the given on-ramp vendor
    async fn initiate_topup(&self, ramp: RampProvider, request: &TopUpRequest) -> Result<()>;
}

/// Mock wallet connector plugin for testing
///
/// Records scanner and top-up invocations so tests can assert which
/// calls reached the vendor and with what payloads.
pub struct MockWalletPlugin {
    proxy: RwLock<Option<Arc<dyn Provider>>>,
    scanner_error: RwLock<Option<String>>,
    topup_error: RwLock<Option<String>>,
    scanner_calls: AtomicUsize,
    topups: Mutex<Vec<(RampProvider, TopUpRequest)>>,
}

impl MockWalletPlugin {
    /// Create a mock plugin with no proxy provider
    pub fn new() -> Self {
        Self {
            proxy: RwLock::new(None),
            scanner_error: RwLock::new(None),
            topup_error: RwLock::new(None),
            scanner_calls: AtomicUsize::new(0),
            topups: Mutex::new(Vec::new()),
        }
    }

    /// Expose the given provider as the plugin's proxy
    pub fn with_proxy_provider(self, provider: Arc<dyn Provider>) -> Self {
        *self.proxy.write().unwrap() = Some(provider);
        self
    }

    /// Fail every scanner call with the given message
    pub fn with_scanner_error(self, message: &str) -> Self {
        *self.scanner_error.write().unwrap() = Some(message.to_string());
        self
    }

    /// Fail every top-up call with the given message
    pub fn with_topup_error(self, message: &str) -> Self {
        *self.topup_error.write().unwrap() = Some(message.to_string());
        self
    }

    /// Number of scanner calls made so far
    pub fn scanner_calls(&self) -> usize {
        self.scanner_calls.load(Ordering::SeqCst)
    }

    /// All top-up invocations recorded so far, in order
    pub fn topups(&self) -> Vec<(RampProvider, TopUpRequest)> {
        self.topups.lock().unwrap().clone()
    }
}

impl Default for MockWalletPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletConnectorPlugin for MockWalletPlugin {
    fn proxy_provider(&self) -> Option<Arc<dyn Provider>> {
        self.proxy.read().unwrap().clone()
    }

    async fn show_wallet_connect_scanner(&self) -> Result<()> {
        self.scanner_calls.fetch_add(1, Ordering::SeqCst);
        match self.scanner_error.read().unwrap().clone() {
            Some(message) => Err(SessionError::Sdk(message)),
            None => Ok(()),
        }
    }

    async fn initiate_topup(&self, ramp: RampProvider, request: &TopUpRequest) -> Result<()> {
        if let Some(message) = self.topup_error.read().unwrap().clone() {
            return Err(SessionError::Sdk(message));
        }
        self.topups.lock().unwrap().push((ramp, request.clone()));
        Ok(())
    }
}

/// Mock plugin SDK for testing
pub struct MockPluginSdk {
    plugin: Option<Arc<MockWalletPlugin>>,
    failure: Option<String>,
    build_calls: AtomicUsize,
}

impl MockPluginSdk {
    /// Create a mock SDK that always yields the given plugin
    pub fn new(plugin: Arc<MockWalletPlugin>) -> Self {
        Self {
            plugin: Some(plugin),
            failure: None,
            build_calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock SDK whose build always fails
    pub fn failing(message: &str) -> Self {
        Self {
            plugin: None,
            failure: Some(message.to_string()),
            build_calls: AtomicUsize::new(0),
        }
    }

    /// Number of build calls made so far
    pub fn build_calls(&self) -> usize {
        self.build_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PluginSdk for MockPluginSdk {
    async fn build_plugin(&self, _config: &PluginConfig) -> Result<Arc<dyn WalletConnectorPlugin>> {
        self.build_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(SessionError::Sdk(message.clone()));
        }
        match &self.plugin {
            Some(plugin) => Ok(plugin.clone()),
            None => Err(SessionError::Sdk("no plugin configured".to_string())),
        }
    }
}
