/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public web3 session crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod console;
pub mod plugin;
pub mod rpc;
pub mod session;
pub mod types;

// Re-export the display channel
pub use console::Console;

// Re-export commonly used types from plugin
pub use plugin::{
    MockPluginSdk,
    MockWalletPlugin,
    PluginBinder,
    PluginBinding,
    PluginSdk,
    WalletConnectorPlugin,
};

// Re-export commonly used types from rpc
pub use rpc::{
    EthRpc,
    HttpProvider,
    MockProvider,
    Provider,
    ProviderConfig,
    Result,
    SessionError,
};

// Re-export commonly used types from session
pub use session::{
    AuthClient,
    AuthSdk,
    MockAuthClient,
    MockAuthSdk,
    Session,
    SessionManager,
    SessionPhase,
};

// Re-export all types
pub use types::*;
