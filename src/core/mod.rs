//! Core functionality for the provider router
//!
//! - `types` - request, adapter result and public response
//! - `providers` - provider identifiers and HTTP adapters
//! - `router` - retry, failover and the `Router` entry point

pub mod providers;
pub mod router;
pub mod types;
