//! Process-wide router
//!
//! The first call builds a [`Router`] from the environment; later calls reuse
//! it. A configuration failure is cached too and returned on every call.

use super::router::Router;
use crate::core::types::{AiResponse, CallRequest};
use crate::utils::error::{AiError, Result};
use tokio::sync::OnceCell;

type RouterCell = OnceCell<std::result::Result<Router, AiError>>;

static GLOBAL_ROUTER: RouterCell = OnceCell::const_new();

/// Get or initialize the global router
pub async fn global_router() -> Result<&'static Router> {
    router_from_cell(&GLOBAL_ROUTER, Router::from_env).await
}

/// Dispatch through the process-wide router
pub async fn dispatch(request: CallRequest) -> Result<AiResponse> {
    global_router().await?.dispatch(request).await
}

/// Initialize `cell` with `build` on first use and hand out the cached outcome
async fn router_from_cell<F>(cell: &RouterCell, build: F) -> Result<&Router>
where
    F: FnOnce() -> Result<Router>,
{
    cell.get_or_init(|| async { build() })
        .await
        .as_ref()
        .map_err(Clone::clone)
}
