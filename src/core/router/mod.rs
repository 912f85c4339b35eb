//! Provider router: retry and failover across AI providers
//!
//! ## Module Structure
//!
//! - `retry` - retry policy and the per-provider retry loop
//! - `chain` - ordered, de-duplicated provider chain
//! - `failover` - walks the chain and produces the exhaustion error
//! - `normalize` - builds the public response and merges metadata
//! - `router` - the `Router` entry point
//! - `global` - lazily built process-wide router

pub mod chain;
pub mod failover;
pub mod global;
pub mod normalize;
pub mod retry;
pub mod router;


pub use chain::{ChainEntry, ProviderChain};
pub use failover::{FailoverOrchestrator, FailoverSuccess};
pub use global::{dispatch, global_router};
pub use normalize::{build_response, merge_metadata};
pub use retry::{RetryExecutor, RetryPolicy, TerminalFailure};
pub use router::Router;
