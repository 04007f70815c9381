//! Global Async Runtime
//!
//! Provides a shared Tokio runtime for the synchronous command layer.
//! Command handlers drive the async store through [`block_on`].

use once_cell::sync::Lazy;
use tokio::runtime::Runtime;

/// Global shared Tokio runtime
///
/// This runtime is initialized lazily on first use. The database pool opened
/// by [`crate::bridge::setup`] lives on it, so every command that touches the
/// store must run through here.
pub static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("promptlib-rt")
        .build()
        .expect("Failed to create Tokio runtime")
});

/// Run a future to completion (blocking the current thread)
///
/// Must not be called from inside an async context.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    RUNTIME.block_on(future)
}
