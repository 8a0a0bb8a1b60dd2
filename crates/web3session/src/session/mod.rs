/*
[INPUT]:  Session configuration and user-triggered lifecycle actions
[OUTPUT]: Observable sessions plus the manager that drives them
[POS]:    Session layer - auth client lifecycle and action surface
[UPDATE]: When the lifecycle or the SDK boundary changes
*/

pub mod client;
pub mod manager;
pub mod state;

pub use client::{AuthClient, AuthSdk, MockAuthClient, MockAuthSdk};
pub use manager::SessionManager;
pub use state::{Session, SessionPhase};
