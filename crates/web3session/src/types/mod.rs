/*
[INPUT]:  SDK option schemas and wire payload definitions
[OUTPUT]: Typed Rust structs/enums with serialization support
[POS]:    Data layer - type definitions shared across the crate
[UPDATE]: When SDK option or payload schemas change
*/

pub mod config;
pub mod models;

pub use config::*;
pub use models::*;
