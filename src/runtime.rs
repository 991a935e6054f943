//! Runtime abstraction layer for async operations
//!
//! Coordinator events are fire-and-forget: they are spawned onto whatever
//! executor the host installed and report back only through session state.
//! Tokio is the default executor.

use crate::{MapError, Result};
use std::future::Future;
use std::pin::Pin;

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(
        &self,
        future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
    ) -> Result<Box<dyn AsyncHandle>>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task
    fn cancel(&self);
}

/// Convenience function for spawning with type safety
pub fn spawn<F>(future: F) -> Result<Box<dyn AsyncHandle>>
where
    F: Future<Output = ()> + Send + 'static,
{
    log::trace!("runtime::spawn() - spawning new async task");
    runtime().spawn_boxed(Box::pin(future))
}

/// Default spawner implementations
pub mod spawners {
    use super::*;

    pub mod tokio_impl {
        use super::*;
        use ::tokio::runtime::Handle;
        use ::tokio::task::JoinHandle;

        /// Tokio-based async spawner.
        ///
        /// Without a pinned handle it spawns onto the runtime of the calling
        /// context.
        #[derive(Debug, Clone, Default)]
        pub struct TokioSpawner {
            handle: Option<Handle>,
        }

        impl TokioSpawner {
            pub fn new(handle: Handle) -> Self {
                Self {
                    handle: Some(handle),
                }
            }
        }

        impl AsyncSpawner for TokioSpawner {
            fn spawn_boxed(
                &self,
                future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
            ) -> Result<Box<dyn AsyncHandle>> {
                let handle = match &self.handle {
                    Some(handle) => handle.clone(),
                    None => Handle::try_current()
                        .map_err(|e| MapError::Runtime(format!("no tokio runtime: {e}")))?,
                };
                Ok(Box::new(TokioHandle(handle.spawn(future))))
            }
        }

        struct TokioHandle(JoinHandle<()>);

        impl AsyncHandle for TokioHandle {
            fn is_finished(&self) -> bool {
                self.0.is_finished()
            }

            fn cancel(&self) {
                self.0.abort();
            }
        }
    }
}

/// Global runtime instance
static RUNTIME: std::sync::OnceLock<Box<dyn AsyncSpawner>> = std::sync::OnceLock::new();

/// Initialize the runtime with a specific spawner.
///
/// Only the first call takes effect; returns false if a spawner was already set.
pub fn init_runtime(spawner: Box<dyn AsyncSpawner>) -> bool {
    RUNTIME.set(spawner).is_ok()
}

/// Get the global runtime spawner
pub fn runtime() -> &'static dyn AsyncSpawner {
    RUNTIME
        .get_or_init(|| Box::new(spawners::tokio_impl::TokioSpawner::default()))
        .as_ref()
}
