/*
[INPUT]:  SDK constructor options and plugin options
[OUTPUT]: Typed configuration passed through to the external SDKs
[POS]:    Data layer - configuration surface for client and plugin
[UPDATE]: When the SDK option schema changes
*/

use serde::{Deserialize, Serialize};
use url::Url;

use crate::rpc::{Result, SessionError};

/// Auth network the client is registered against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthNetwork {
    Mainnet,
    Testnet,
    Aqua,
    Celeste,
    Cyan,
}

/// Where the SDK persists its session cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Local,
    Session,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthMode {
    Dapp,
    Wallet,
}

/// Chain family addressed by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainNamespace {
    Eip155,
    Solana,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

/// Description of the chain the provider will be pointed at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    #[serde(rename = "chainNamespace")]
    pub namespace: ChainNamespace,
    /// Hex chain id, e.g. "0xaa36a7"
    pub chain_id: String,
    pub display_name: String,
    pub rpc_target: String,
    pub block_explorer: String,
}

impl ChainConfig {
    /// The Sepolia test network with a public RPC endpoint
    pub fn sepolia() -> Self {
        Self {
            namespace: ChainNamespace::Eip155,
            chain_id: "0xaa36a7".to_string(),
            display_name: "Sepolia".to_string(),
            rpc_target: "https://eth-sepolia.public.blastapi.io".to_string(),
            block_explorer: "https://sepolia.etherscan.io/".to_string(),
        }
    }
}

/// Branding block shown inside the login UI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteLabelConfig {
    pub name: String,
    pub logo_dark: String,
    pub logo_light: String,
    pub dark: bool,
}

/// Login modal appearance and method ordering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    pub theme: Theme,
    pub app_logo: String,
    pub login_methods_order: Vec<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            app_logo: String::new(),
            login_methods_order: Vec::new(),
        }
    }
}

/// One login adapter registered with the client before the modal opens.
///
/// Adapters are keyed by the SDK's adapter name; the optional fields are
/// passed through unchanged when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterConfig {
    pub name: String,
    #[serde(rename = "sessionTime", skip_serializing_if = "Option::is_none")]
    pub session_time_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_label: Option<WhiteLabelConfig>,
    /// Adapter-specific chain override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<ChainConfig>,
}

impl AdapterConfig {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            session_time_secs: None,
            white_label: None,
            chain: None,
        }
    }
}

/// Everything the auth SDK needs to construct a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub client_id: String,
    pub network: AuthNetwork,
    #[serde(rename = "storageKey")]
    pub storage: StorageKind,
    pub auth_mode: AuthMode,
    #[serde(rename = "chainConfig")]
    pub chain: ChainConfig,
    #[serde(rename = "uiConfig")]
    pub ui: UiConfig,
    pub adapters: Vec<AdapterConfig>,
}

impl SessionConfig {
    /// A mainnet dapp config for `client_id` pointed at `chain`
    pub fn new(client_id: &str, chain: ChainConfig) -> Self {
        Self {
            client_id: client_id.to_string(),
            network: AuthNetwork::Mainnet,
            storage: StorageKind::Local,
            auth_mode: AuthMode::Dapp,
            chain,
            ui: UiConfig::default(),
            adapters: Vec::new(),
        }
    }

    /// Check the configuration is usable before handing it to the SDK
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(SessionError::Config(
                "client id must not be empty".to_string(),
            ));
        }
        let hex = self
            .chain
            .chain_id
            .strip_prefix("0x")
            .unwrap_or(self.chain.chain_id.as_str());
        if hex.is_empty() || u64::from_str_radix(hex, 16).is_err() {
            return Err(SessionError::Config(format!(
                "invalid hex chain id: {}",
                self.chain.chain_id
            )));
        }
        Url::parse(&self.chain.rpc_target)
            .map_err(|e| SessionError::Config(format!("invalid rpc target: {e}")))?;
        Ok(())
    }
}

/// Which session transition makes the plugin binder eligible to bind.
///
/// Binding on `ClientReady` attaches the plugin before any login has
/// happened and leans on the plugin's proxy provider as the session
/// provider; `ProviderConnected` waits for a live provider from login.
/// Both behaviors exist in the wild, so the choice is explicit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindTrigger {
    ClientReady,
    #[default]
    ProviderConnected,
}

/// Where the plugin renders its launcher button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonPosition {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

/// Plugin widget theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginTheme {
    pub is_dark: bool,
    pub primary_color: String,
}

impl Default for PluginTheme {
    fn default() -> Self {
        Self {
            is_dark: true,
            primary_color: "#00a8ff".to_string(),
        }
    }
}

/// Branding block for the plugin widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginWhiteLabel {
    pub theme: PluginTheme,
    pub logo_dark: String,
    pub logo_light: String,
}

/// Wallet-connector plugin options, including when to bind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    pub bind_on: BindTrigger,
    pub button_position: ButtonPosition,
    pub enable_wallet_connect: bool,
    pub white_label: PluginWhiteLabel,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            bind_on: BindTrigger::default(),
            button_position: ButtonPosition::default(),
            enable_wallet_connect: true,
            white_label: PluginWhiteLabel::default(),
        }
    }
}

impl PluginConfig {
    /// Override the bind trigger
    pub fn with_trigger(mut self, bind_on: BindTrigger) -> Self {
        self.bind_on = bind_on;
        self
    }
}
