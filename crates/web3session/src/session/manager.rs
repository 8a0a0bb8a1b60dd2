/*
[INPUT]:  User actions (initialize, login, logout, queries, signing)
[OUTPUT]: Session mutations plus results on the display console
[POS]:    Session layer - the action surface owning the session lifecycle
[UPDATE]: When actions are added or readiness rules change
*/

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::console::Console;
use crate::rpc::{EthRpc, Provider};
use crate::session::{AuthClient, AuthSdk, Session, SessionPhase};
use crate::types::{IdToken, SessionConfig, TransactionRequest, UserInfo};

/// Owns the session lifecycle and performs every user-triggered action.
///
/// Each action checks readiness first. A failed precondition writes a
/// short notice to the console and returns `None`; it never raises. A
/// failed action is logged and also yields `None`. Successful results
/// are written to the console as JSON and returned to the caller.
pub struct SessionManager {
    session: Session,
    sdk: Arc<dyn AuthSdk>,
    console: Console,
}

impl SessionManager {
    /// Create a manager over a fresh, uninitialized session
    pub fn new(sdk: Arc<dyn AuthSdk>, console: Console) -> Self {
        Self {
            session: Session::new(),
            sdk,
            console,
        }
    }

    /// Handle to the managed session
    pub fn session(&self) -> Session {
        self.session.clone()
    }

    /// Handle to the shared display console
    pub fn console(&self) -> Console {
        self.console.clone()
    }

    /// One-time client construction.
    ///
    /// Runs the SDK setup (adapters, modal, chain config) and installs
    /// the client on success. Any construction error is logged and the
    /// session stays fully uninitialized, never partially configured.
    /// Calling again after a successful initialize is a logged no-op.
    pub async fn initialize(&self, config: SessionConfig) -> Session {
        if self.session.phase() != SessionPhase::Uninitialized {
            warn!(session = %self.session.id(), "session already initialized, skipping");
            return self.session();
        }
        if let Err(e) = config.validate() {
            error!(error = %e, "session configuration rejected");
            return self.session();
        }

        self.session.begin_initializing();
        match self.sdk.initialize(&config).await {
            Ok(client) => {
                self.session.install_client(client);
                info!(session = %self.session.id(), "auth client initialized");
            }
            Err(e) => {
                error!(error = %e, "auth client initialization failed");
                self.session.reset_uninitialized();
            }
        }
        self.session()
    }

    /// Interactive login. Installs and returns the connected provider.
    pub async fn login(&self) -> Option<Arc<dyn Provider>> {
        let client = self.require_client()?;
        match client.connect().await {
            Ok(provider) => {
                self.session.install_provider(provider.clone());
                info!(session = %self.session.id(), "provider connected");
                Some(provider)
            }
            Err(e) => {
                error!(error = %e, "login failed");
                None
            }
        }
    }

    /// End the session. The provider is cleared only after the SDK
    /// confirms the logout.
    pub async fn logout(&self) {
        if self.require_provider().is_none() {
            return;
        }
        let Some(client) = self.require_client() else {
            return;
        };
        match client.logout().await {
            Ok(()) => {
                self.session.clear_provider();
                info!(session = %self.session.id(), "logged out");
            }
            Err(e) => error!(error = %e, "logout failed"),
        }
    }

    /// Profile details for the logged-in user
    pub async fn get_user_info(&self) -> Option<UserInfo> {
        self.require_provider()?;
        let client = self.require_client()?;
        match client.get_user_info().await {
            Ok(info) => {
                self.console.print(&info);
                Some(info)
            }
            Err(e) => {
                error!(error = %e, "user info fetch failed");
                None
            }
        }
    }

    /// Identity token for the logged-in user
    pub async fn authenticate_user(&self) -> Option<IdToken> {
        self.require_provider()?;
        let client = self.require_client()?;
        match client.authenticate_user().await {
            Ok(token) => {
                self.console.print(&token);
                Some(token)
            }
            Err(e) => {
                error!(error = %e, "user authentication failed");
                None
            }
        }
    }

    /// Chain id of the connected network
    pub async fn query_chain_id(&self) -> Option<u64> {
        let rpc = self.rpc()?;
        match rpc.chain_id().await {
            Ok(chain_id) => {
                self.console.print(&chain_id);
                Some(chain_id)
            }
            Err(e) => {
                error!(error = %e, "chain id query failed");
                None
            }
        }
    }

    /// Addresses controlled by the connected wallet
    pub async fn query_accounts(&self) -> Option<Vec<String>> {
        let rpc = self.rpc()?;
        match rpc.accounts().await {
            Ok(accounts) => {
                self.console.print(&accounts);
                Some(accounts)
            }
            Err(e) => {
                error!(error = %e, "accounts query failed");
                None
            }
        }
    }

    /// Ether balance of the wallet's first account
    pub async fn query_balance(&self) -> Option<Decimal> {
        let rpc = self.rpc()?;
        let address = self.first_account(&rpc).await?;
        match rpc.balance_ether(&address).await {
            Ok(balance) => {
                self.console.print(&balance);
                Some(balance)
            }
            Err(e) => {
                error!(error = %e, "balance query failed");
                None
            }
        }
    }

    /// Sign a message with the wallet's first account
    pub async fn sign_message(&self, message: &str) -> Option<String> {
        let rpc = self.rpc()?;
        let address = self.first_account(&rpc).await?;
        match rpc.sign_message(&address, message).await {
            Ok(signature) => {
                self.console.print(&signature);
                Some(signature)
            }
            Err(e) => {
                error!(error = %e, "message signing failed");
                None
            }
        }
    }

    /// Send a value transfer from the wallet's first account and return
    /// the transaction hash
    pub async fn send_transaction(&self, to: &str, value_wei: u128) -> Option<String> {
        let rpc = self.rpc()?;
        let address = self.first_account(&rpc).await?;
        let tx = TransactionRequest::transfer(&address, to, value_wei);
        match rpc.send_transaction(&tx).await {
            Ok(hash) => {
                self.console.print(&hash);
                Some(hash)
            }
            Err(e) => {
                error!(error = %e, "transaction send failed");
                None
            }
        }
    }

    /// Export the wallet's private key, where the provider supports it
    pub async fn export_private_key(&self) -> Option<String> {
        let rpc = self.rpc()?;
        match rpc.private_key().await {
            Ok(key) => {
                self.console.print(&key);
                Some(key)
            }
            Err(e) => {
                error!(error = %e, "private key export failed");
                None
            }
        }
    }

    fn require_client(&self) -> Option<Arc<dyn AuthClient>> {
        let client = self.session.client();
        if client.is_none() {
            self.console.report("auth client not initialized yet");
        }
        client
    }

    fn require_provider(&self) -> Option<Arc<dyn Provider>> {
        let provider = self.session.provider();
        if provider.is_none() {
            self.console.report("provider not initialized yet");
        }
        provider
    }

    fn rpc(&self) -> Option<EthRpc> {
        self.require_provider().map(EthRpc::new)
    }

    async fn first_account(&self, rpc: &EthRpc) -> Option<String> {
        match rpc.accounts().await {
            Ok(accounts) if !accounts.is_empty() => accounts.into_iter().next(),
            Ok(_) => {
                error!("wallet returned no accounts");
                None
            }
            Err(e) => {
                error!(error = %e, "accounts query failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::MockProvider;
    use crate::session::{MockAuthClient, MockAuthSdk};
    use serde_json::json;

    fn test_config() -> SessionConfig {
        SessionConfig::new("test-client-id", crate::types::ChainConfig::sepolia())
    }

    fn manager_for(client: Arc<MockAuthClient>) -> (SessionManager, Arc<MockAuthSdk>) {
        let sdk = Arc::new(MockAuthSdk::new(client));
        let manager = SessionManager::new(sdk.clone(), Console::new());
        (manager, sdk)
    }

    fn rpc_provider() -> MockProvider {
        MockProvider::new()
            .with_response("eth_chainId", json!("0xaa36a7"))
            .with_response("eth_accounts", json!(["0xabc0000000000000000000000000000000000001"]))
            .with_response("eth_getBalance", json!("0xde0b6b3a7640000"))
            .with_response("personal_sign", json!("0xsigned"))
            .with_response("eth_sendTransaction", json!("0xtxhash"))
            .with_response("eth_private_key", json!("deadbeef"))
    }

    #[tokio::test]
    async fn test_initialize_readies_client() {
        let client = Arc::new(MockAuthClient::new());
        let (manager, sdk) = manager_for(client);

        let session = manager.initialize(test_config()).await;
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(session.client().is_some());
        assert!(session.provider().is_none());
        assert_eq!(sdk.init_calls(), 1);
    }

    #[tokio::test]
    async fn test_initialize_failure_leaves_session_uninitialized() {
        let sdk = Arc::new(MockAuthSdk::failing("modal construction failed"));
        let manager = SessionManager::new(sdk, Console::new());

        let session = manager.initialize(test_config()).await;
        assert_eq!(session.phase(), SessionPhase::Uninitialized);
        assert!(session.client().is_none());
        assert!(manager.console().last().is_none());
    }

    #[tokio::test]
    async fn test_initialize_rejects_invalid_config() {
        let client = Arc::new(MockAuthClient::new());
        let (manager, sdk) = manager_for(client);

        let config = SessionConfig::new("", crate::types::ChainConfig::sepolia());
        let session = manager.initialize(config).await;

        assert_eq!(session.phase(), SessionPhase::Uninitialized);
        assert_eq!(sdk.init_calls(), 0);
    }

    #[tokio::test]
    async fn test_initialize_twice_is_skipped() {
        let client = Arc::new(MockAuthClient::new());
        let (manager, sdk) = manager_for(client);

        manager.initialize(test_config()).await;
        let session = manager.initialize(test_config()).await;
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(sdk.init_calls(), 1);
    }

    #[tokio::test]
    async fn test_login_before_initialize_reports_not_ready() {
        let client = Arc::new(MockAuthClient::new());
        let (manager, _sdk) = manager_for(client.clone());

        assert!(manager.login().await.is_none());
        assert_eq!(
            manager.console().last().as_deref(),
            Some("auth client not initialized yet")
        );
        assert_eq!(client.connect_calls(), 0);
    }

    #[tokio::test]
    async fn test_login_connects_provider() {
        let client = Arc::new(MockAuthClient::new());
        let (manager, _sdk) = manager_for(client.clone());

        manager.initialize(test_config()).await;
        let provider = manager.login().await;
        assert!(provider.is_some());
        assert_eq!(manager.session().phase(), SessionPhase::Connected);
        assert_eq!(client.connect_calls(), 1);
    }

    #[tokio::test]
    async fn test_login_failure_keeps_session_ready() {
        let client = Arc::new(MockAuthClient::new().with_connect_error("user closed modal"));
        let (manager, _sdk) = manager_for(client);

        manager.initialize(test_config()).await;
        assert!(manager.login().await.is_none());
        assert_eq!(manager.session().phase(), SessionPhase::Ready);
        assert!(manager.session().provider().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_provider() {
        let client = Arc::new(MockAuthClient::new());
        let (manager, _sdk) = manager_for(client.clone());

        manager.initialize(test_config()).await;
        manager.login().await;
        manager.logout().await;

        assert_eq!(manager.session().phase(), SessionPhase::Ready);
        assert!(manager.session().provider().is_none());
        assert!(manager.session().client().is_some());
        assert_eq!(client.logout_calls(), 1);
    }

    #[tokio::test]
    async fn test_logout_without_provider_reports_not_ready() {
        let client = Arc::new(MockAuthClient::new());
        let (manager, _sdk) = manager_for(client.clone());

        manager.initialize(test_config()).await;
        manager.logout().await;

        assert_eq!(
            manager.console().last().as_deref(),
            Some("provider not initialized yet")
        );
        assert_eq!(client.logout_calls(), 0);
    }

    #[tokio::test]
    async fn test_logout_failure_keeps_provider() {
        let client = Arc::new(MockAuthClient::new().with_logout_error("session expired upstream"));
        let (manager, _sdk) = manager_for(client);

        manager.initialize(test_config()).await;
        manager.login().await;
        manager.logout().await;

        assert_eq!(manager.session().phase(), SessionPhase::Connected);
        assert!(manager.session().provider().is_some());
    }

    #[tokio::test]
    async fn test_get_user_info_prints_profile() {
        let info = UserInfo {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            ..UserInfo::default()
        };
        let client = Arc::new(MockAuthClient::new().with_user_info(info.clone()));
        let (manager, _sdk) = manager_for(client);

        manager.initialize(test_config()).await;
        manager.login().await;

        assert_eq!(manager.get_user_info().await, Some(info));
        let shown = manager.console().last().unwrap();
        assert!(shown.contains("ada@example.com"));
    }

    #[tokio::test]
    async fn test_user_info_requires_provider() {
        let client = Arc::new(MockAuthClient::new());
        let (manager, _sdk) = manager_for(client);

        manager.initialize(test_config()).await;
        assert!(manager.get_user_info().await.is_none());
        assert_eq!(
            manager.console().last().as_deref(),
            Some("provider not initialized yet")
        );
    }

    #[tokio::test]
    async fn test_query_chain_id() {
        let client =
            Arc::new(MockAuthClient::new().with_provider(Arc::new(rpc_provider())));
        let (manager, _sdk) = manager_for(client);

        manager.initialize(test_config()).await;
        manager.login().await;

        assert_eq!(manager.query_chain_id().await, Some(11_155_111));
        assert_eq!(manager.console().last().as_deref(), Some("11155111"));
    }

    #[tokio::test]
    async fn test_query_balance_resolves_first_account() {
        let provider = Arc::new(rpc_provider());
        let client = Arc::new(MockAuthClient::new().with_provider(provider.clone()));
        let (manager, _sdk) = manager_for(client);

        manager.initialize(test_config()).await;
        manager.login().await;

        let balance = manager.query_balance().await.unwrap();
        assert_eq!(balance, Decimal::ONE);

        let calls = provider.calls();
        assert_eq!(calls[0].0, "eth_accounts");
        assert_eq!(calls[1].0, "eth_getBalance");
    }

    #[tokio::test]
    async fn test_sign_message_uses_resolved_account() {
        let provider = Arc::new(rpc_provider());
        let client = Arc::new(MockAuthClient::new().with_provider(provider.clone()));
        let (manager, _sdk) = manager_for(client);

        manager.initialize(test_config()).await;
        manager.login().await;

        let signature = manager.sign_message("hello chain").await;
        assert_eq!(signature.as_deref(), Some("0xsigned"));

        let sign_call = provider
            .calls()
            .into_iter()
            .find(|(method, _)| method == "personal_sign")
            .unwrap();
        assert_eq!(
            sign_call.1[1],
            json!("0xabc0000000000000000000000000000000000001")
        );
    }

    #[tokio::test]
    async fn test_send_transaction_returns_hash() {
        let client =
            Arc::new(MockAuthClient::new().with_provider(Arc::new(rpc_provider())));
        let (manager, _sdk) = manager_for(client);

        manager.initialize(test_config()).await;
        manager.login().await;

        let hash = manager
            .send_transaction("0xdef0000000000000000000000000000000000002", 1_000_000)
            .await;
        assert_eq!(hash.as_deref(), Some("0xtxhash"));
    }

    #[tokio::test]
    async fn test_export_private_key() {
        let client =
            Arc::new(MockAuthClient::new().with_provider(Arc::new(rpc_provider())));
        let (manager, _sdk) = manager_for(client);

        manager.initialize(test_config()).await;
        manager.login().await;

        assert_eq!(manager.export_private_key().await.as_deref(), Some("deadbeef"));
    }

    #[tokio::test]
    async fn test_query_failure_leaves_console_untouched() {
        let provider = Arc::new(MockProvider::new());
        let client = Arc::new(MockAuthClient::new().with_provider(provider));
        let (manager, _sdk) = manager_for(client);

        manager.initialize(test_config()).await;
        manager.login().await;
        manager.console().clear();

        assert!(manager.query_chain_id().await.is_none());
        assert!(manager.console().last().is_none());
    }

    #[tokio::test]
    async fn test_no_accounts_skips_balance_call() {
        let provider = Arc::new(MockProvider::new().with_response("eth_accounts", json!([])));
        let client = Arc::new(MockAuthClient::new().with_provider(provider.clone()));
        let (manager, _sdk) = manager_for(client);

        manager.initialize(test_config()).await;
        manager.login().await;

        assert!(manager.query_balance().await.is_none());
        assert_eq!(provider.call_count("eth_getBalance"), 0);
    }
}
