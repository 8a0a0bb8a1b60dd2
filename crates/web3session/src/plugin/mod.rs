/*
[INPUT]:  Session phases and wallet connector plugin actions
[OUTPUT]: One-time plugin attachment plus scanner and top-up flows
[POS]:    Plugin layer - the wallet connector bolted onto a session
[UPDATE]: When plugin capabilities or attachment rules change
*/

pub mod binder;
pub mod connector;

pub use binder::{PluginBinder, PluginBinding};
pub use connector::{MockPluginSdk, MockWalletPlugin, PluginSdk, WalletConnectorPlugin};
