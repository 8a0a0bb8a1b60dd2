/*
[INPUT]:  Provider endpoints and chain operation requests
[OUTPUT]: JSON-RPC round trips and typed chain results
[POS]:    RPC layer - provider abstraction, transport, and facade
[UPDATE]: When adding transports or chain operations
*/

pub mod error;
pub mod facade;
pub mod http;
pub mod provider;

pub use error::{Result, SessionError};
pub use facade::{EthRpc, wei_to_ether};
pub use http::{HttpProvider, ProviderConfig};
pub use provider::{MockProvider, Provider};
