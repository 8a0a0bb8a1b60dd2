/*
[INPUT]:  Session phase transitions and plugin actions (scanner, top-up)
[OUTPUT]: A one-time plugin attachment plus delegated plugin calls
[POS]:    Plugin layer - binds the wallet connector to a ready session
[UPDATE]: When bind eligibility rules or plugin actions change
*/

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::console::Console;
use crate::plugin::connector::{PluginSdk, WalletConnectorPlugin};
use crate::rpc::EthRpc;
use crate::session::{Session, SessionPhase};
use crate::types::{BindTrigger, PluginConfig, TopUpParams};

/// A recorded plugin attachment: which session it is bound to and the
/// attached plugin handle.
#[derive(Clone)]
pub struct PluginBinding {
    session_id: Uuid,
    plugin: Arc<dyn WalletConnectorPlugin>,
}

impl PluginBinding {
    /// Id of the session the plugin is attached to
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The attached plugin handle
    pub fn plugin(&self) -> Arc<dyn WalletConnectorPlugin> {
        self.plugin.clone()
    }
}

/// Attaches a wallet connector plugin to a session exactly once.
///
/// The binder watches session phase transitions and binds when the
/// configured trigger phase is reached. Binding constructs the plugin,
/// attaches it to the session's client, and records the attachment;
/// a failed attempt leaves the binder unbound so a later transition can
/// try again. Plugin actions check the binding first and report a
/// console notice when it is missing.
pub struct PluginBinder {
    session: Session,
    sdk: Arc<dyn PluginSdk>,
    config: PluginConfig,
    console: Console,
    binding: Mutex<Option<PluginBinding>>,
}

impl PluginBinder {
    /// Create an unbound binder for the given session
    pub fn new(
        session: Session,
        sdk: Arc<dyn PluginSdk>,
        config: PluginConfig,
        console: Console,
    ) -> Self {
        Self {
            session,
            sdk,
            config,
            console,
            binding: Mutex::new(None),
        }
    }

    /// Whether the plugin has been attached
    pub async fn is_bound(&self) -> bool {
        self.binding.lock().await.is_some()
    }

    /// The recorded attachment, once bound
    pub async fn binding(&self) -> Option<PluginBinding> {
        self.binding.lock().await.clone()
    }

    fn eligible(&self, phase: SessionPhase) -> bool {
        match self.config.bind_on {
            BindTrigger::ClientReady => phase.is_client_ready(),
            BindTrigger::ProviderConnected => phase.is_connected(),
        }
    }

    /// Observe the session and bind when it becomes eligible.
    ///
    /// One bind attempt per observed phase, then waits for the next
    /// transition. Returns once a binding exists, including one made by
    /// calling [`bind`](Self::bind) directly, or when the phase channel
    /// closes.
    pub async fn run(&self) {
        let mut rx = self.session.subscribe();
        debug!(session = %self.session.id(), "plugin binder watching session");
        loop {
            if self.is_bound().await || self.bind().await {
                break;
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
    }

    /// Attach the plugin if the session is eligible and nothing is
    /// bound yet. Returns whether this call performed the attachment.
    ///
    /// The attachment is recorded only after the client accepts the
    /// plugin. When the session has no provider, the plugin's proxy
    /// provider (or failing that, the client's own) is installed as the
    /// session provider.
    pub async fn bind(&self) -> bool {
        let mut guard = self.binding.lock().await;
        if guard.is_some() {
            return false;
        }

        let phase = self.session.phase();
        if !self.eligible(phase) {
            debug!(session = %self.session.id(), phase = ?phase, "session not eligible for plugin bind");
            return false;
        }
        let Some(client) = self.session.client() else {
            debug!(session = %self.session.id(), "no auth client to attach plugin to");
            return false;
        };

        let plugin = match self.sdk.build_plugin(&self.config).await {
            Ok(plugin) => plugin,
            Err(e) => {
                error!(error = %e, "wallet plugin construction failed");
                return false;
            }
        };
        if let Err(e) = client.add_plugin(plugin.clone()).await {
            error!(error = %e, "wallet plugin attach failed");
            return false;
        }

        if self.session.provider().is_none() {
            if let Some(adopted) = plugin.proxy_provider().or_else(|| client.provider()) {
                self.session.install_provider(adopted);
                info!(session = %self.session.id(), "adopted plugin provider for session");
            }
        }

        *guard = Some(PluginBinding {
            session_id: self.session.id(),
            plugin,
        });
        info!(session = %self.session.id(), "wallet plugin bound");
        true
    }

    /// Open the wallet-connect scanner UI
    pub async fn show_scanner(&self) {
        let Some(plugin) = self.bound_plugin().await else {
            return;
        };
        match plugin.show_wallet_connect_scanner().await {
            Ok(()) => self.console.clear(),
            Err(e) => error!(error = %e, "wallet connect scanner failed"),
        }
    }

    /// Start a fiat top-up for the wallet's first account.
    ///
    /// The receiving address is always resolved from the connected
    /// wallet; when no address can be resolved the on-ramp is never
    /// invoked. Failures are logged and never surfaced to the caller.
    pub async fn top_up(&self, params: TopUpParams) {
        let Some(provider) = self.session.provider() else {
            self.console.report("provider not initialized yet");
            return;
        };

        let rpc = EthRpc::new(provider);
        let accounts = match rpc.accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                error!(error = %e, "accounts query failed, top-up aborted");
                return;
            }
        };
        let Some(address) = accounts.into_iter().next() else {
            error!(session = %self.session.id(), "wallet returned no accounts, top-up aborted");
            return;
        };

        let Some(plugin) = self.bound_plugin().await else {
            return;
        };
        let request = params.for_address(&address);
        match plugin.initiate_topup(params.ramp, &request).await {
            Ok(()) => {
                info!(session = %self.session.id(), ramp = ?params.ramp, address = %address, "top-up initiated")
            }
            Err(e) => error!(error = %e, "top-up failed"),
        }
    }

    async fn bound_plugin(&self) -> Option<Arc<dyn WalletConnectorPlugin>> {
        let plugin = self.binding.lock().await.as_ref().map(|b| b.plugin());
        if plugin.is_none() {
            self.console.report("wallet plugin not initialized yet");
        }
        plugin
    }
}
