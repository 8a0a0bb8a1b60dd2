/*
[INPUT]:  Session configuration and connect/logout/identity calls
[OUTPUT]: Auth client handles and the SDK boundary traits
[POS]:    Session layer - abstraction over the vendor auth SDK
[UPDATE]: When the SDK surface gains calls or a new vendor is wired in
*/

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;

use crate::plugin::WalletConnectorPlugin;
use crate::rpc::{MockProvider, Provider, Result, SessionError};
use crate::types::{IdToken, SessionConfig, UserInfo};

/// Trait for constructing an auth client from configuration
///
/// Implement this trait for your auth vendor. The one call performs the
/// whole modal/adapter setup and yields a ready client on success.
#[async_trait]
pub trait AuthSdk: Send + Sync {
    /// Build and initialize a client for the given configuration
    async fn initialize(&self, config: &SessionConfig) -> Result<Arc<dyn AuthClient>>;
}

/// Trait for an initialized auth client
///
/// The client owns the vendor session. Connecting yields a provider for
/// RPC traffic; identity calls work as soon as the client exists and do
/// not require a live provider.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Run the login flow and return the connected provider
    async fn connect(&self) -> Result<Arc<dyn Provider>>;

    /// End the vendor session
    async fn logout(&self) -> Result<()>;

    /// Fetch the identity token for the logged-in user
    async fn authenticate_user(&self) -> Result<IdToken>;

    /// Fetch profile details for the logged-in user
    async fn get_user_info(&self) -> Result<UserInfo>;

    /// The provider the client currently exposes, if any
    fn provider(&self) -> Option<Arc<dyn Provider>>;

    /// Attach a wallet connector plugin to this client
    async fn add_plugin(&self, plugin: Arc<dyn WalletConnectorPlugin>) -> Result<()>;
}

/// Mock auth client for testing
///
/// Connects to a canned provider, hands out configured identity data,
/// and records every call so tests can assert on interaction counts.
pub struct MockAuthClient {
    connect_provider: RwLock<Arc<dyn Provider>>,
    own_provider: RwLock<Option<Arc<dyn Provider>>>,
    user_info: RwLock<UserInfo>,
    id_token: RwLock<Option<IdToken>>,
    connect_error: RwLock<Option<String>>,
    logout_error: RwLock<Option<String>>,
    add_plugin_error: RwLock<Option<String>>,
    connect_calls: AtomicUsize,
    logout_calls: AtomicUsize,
    plugins: Mutex<Vec<Arc<dyn WalletConnectorPlugin>>>,
}

impl MockAuthClient {
    /// Create a mock client that connects to a fresh `MockProvider`
    pub fn new() -> Self {
        Self {
            connect_provider: RwLock::new(Arc::new(MockProvider::new())),
            own_provider: RwLock::new(None),
            user_info: RwLock::new(UserInfo::default()),
            id_token: RwLock::new(None),
            connect_error: RwLock::new(None),
            logout_error: RwLock::new(None),
            add_plugin_error: RwLock::new(None),
            connect_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            plugins: Mutex::new(Vec::new()),
        }
    }

    /// Use the given provider for subsequent connects
    pub fn with_provider(self, provider: Arc<dyn Provider>) -> Self {
        *self.connect_provider.write().unwrap() = provider;
        self
    }

    /// Expose a provider without requiring a connect first
    pub fn with_own_provider(self, provider: Arc<dyn Provider>) -> Self {
        *self.own_provider.write().unwrap() = Some(provider);
        self
    }

    /// Return the given profile from `get_user_info`
    pub fn with_user_info(self, info: UserInfo) -> Self {
        *self.user_info.write().unwrap() = info;
        self
    }

    /// Return the given token from `authenticate_user`
    pub fn with_id_token(self, token: IdToken) -> Self {
        *self.id_token.write().unwrap() = Some(token);
        self
    }

    /// Fail every connect with the given message
    pub fn with_connect_error(self, message: &str) -> Self {
        *self.connect_error.write().unwrap() = Some(message.to_string());
        self
    }

    /// Fail every logout with the given message
    pub fn with_logout_error(self, message: &str) -> Self {
        *self.logout_error.write().unwrap() = Some(message.to_string());
        self
    }

    /// Fail every plugin attach with the given message
    pub fn with_add_plugin_error(self, message: &str) -> Self {
        *self.add_plugin_error.write().unwrap() = Some(message.to_string());
        self
    }

    /// Number of connect calls made so far
    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }

    /// Number of logout calls made so far
    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    /// Number of plugins attached so far
    pub fn plugin_count(&self) -> usize {
        self.plugins.lock().unwrap().len()
    }
}

impl Default for MockAuthClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthClient for MockAuthClient {
    async fn connect(&self) -> Result<Arc<dyn Provider>> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.connect_error.read().unwrap().clone() {
            return Err(SessionError::Sdk(message));
        }
        let provider = self.connect_provider.read().unwrap().clone();
        *self.own_provider.write().unwrap() = Some(provider.clone());
        Ok(provider)
    }

    async fn logout(&self) -> Result<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.logout_error.read().unwrap().clone() {
            return Err(SessionError::Sdk(message));
        }
        *self.own_provider.write().unwrap() = None;
        Ok(())
    }

    async fn authenticate_user(&self) -> Result<IdToken> {
        self.id_token
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| SessionError::Sdk("no id token configured".to_string()))
    }

    async fn get_user_info(&self) -> Result<UserInfo> {
        Ok(self.user_info.read().unwrap().clone())
    }

    fn provider(&self) -> Option<Arc<dyn Provider>> {
        self.own_provider.read().unwrap().clone()
    }

    async fn add_plugin(&self, plugin: Arc<dyn WalletConnectorPlugin>) -> Result<()> {
        if let Some(message) = self.add_plugin_error.read().unwrap().clone() {
            return Err(SessionError::Sdk(message));
        }
        self.plugins.lock().unwrap().push(plugin);
        Ok(())
    }
}

/// Mock auth SDK for testing
pub struct MockAuthSdk {
    client: Option<Arc<MockAuthClient>>,
    failure: Option<String>,
    init_calls: AtomicUsize,
}

impl MockAuthSdk {
    /// Create a mock SDK that always yields the given client
    pub fn new(client: Arc<MockAuthClient>) -> Self {
        Self {
            client: Some(client),
            failure: None,
            init_calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock SDK whose initialize always fails
    pub fn failing(message: &str) -> Self {
        Self {
            client: None,
            failure: Some(message.to_string()),
            init_calls: AtomicUsize::new(0),
        }
    }

    /// Number of initialize calls made so far
    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthSdk for MockAuthSdk {
    async fn initialize(&self, _config: &SessionConfig) -> Result<Arc<dyn AuthClient>> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(SessionError::Sdk(message.clone()));
        }
        match &self.client {
            Some(client) => Ok(client.clone()),
            None => Err(SessionError::Sdk("no client configured".to_string())),
        }
    }
}
