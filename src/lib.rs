//! # provider-router
//!
//! A resilient multi-provider AI completion gateway. One logical completion
//! request is dispatched across an ordered chain of interchangeable providers
//! (OpenAI, Gemini, Anthropic, Ollama), with bounded per-provider retry and
//! automatic failover once a provider's retry budget is spent. Provider
//! replies and failures are normalized into one stable contract:
//! [`AiResponse`] or [`AiError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use provider_router::{CallRequest, Router, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // AI_PROVIDER_PRIMARY, AI_PROVIDER_SECONDARY, LLM_API_KEY, ... from the environment
//!     let router = Router::new(RouterConfig::from_env()?)?;
//!
//!     let response = router
//!         .dispatch(
//!             CallRequest::new("Summarize the month-end close checklist")
//!                 .with_max_tokens(200)
//!                 .with_meta("request_id", "abc"),
//!         )
//!         .await?;
//!
//!     println!("{} answered: {}", response.provider, response.content);
//!     println!("{}", response.to_json()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Process-wide router
//!
//! ```rust,no_run
//! # async fn example() -> provider_router::Result<()> {
//! let response = provider_router::dispatch(provider_router::CallRequest::new("Hello")).await?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

pub use config::{ProviderSettings, RouterConfig};
pub use crate::core::providers::{ProviderAdapter, ProviderId};
pub use crate::core::router::{RetryPolicy, Router, dispatch, global_router};
pub use crate::core::types::{AiResponse, CallRequest, ProviderResult};
pub use utils::error::{AiError, AiErrorKind, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
