//! Utility modules for the provider router
//!
//! - **config**: key/value configuration sources
//! - **error**: the caller-visible error type
//! - **logging**: tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ConfigSource, EnvSource, LayeredSource, MapSource, YamlFileSource};
pub use error::{AiError, AiErrorKind, Result};
pub use logging::{LogFormat, init_logging};
