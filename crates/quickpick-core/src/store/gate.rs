//! The confirmation gate run before a close request is committed.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::errors::QuickpickError;

/// Failure raised by a close gate. Propagated to the `close_picker` caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Close gate failed: {message}")]
pub struct GateError {
    message: String,
}

impl GateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl QuickpickError for GateError {
    fn error_code(&self) -> &'static str {
        "CLOSE_GATE_FAILED"
    }
}

pub type GateFuture = BoxFuture<'static, Result<bool, GateError>>;

/// Veto hook evaluated by `close_picker`.
///
/// Resolves to `true` to allow the close, `false` to keep the picker open.
/// Synchronous gates are wrapped in an already-ready future so the store
/// awaits every gate the same way.
#[derive(Clone)]
pub struct CloseGate {
    check: Arc<dyn Fn() -> GateFuture + Send + Sync>,
}

impl CloseGate {
    pub fn from_fn<F>(check: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(move || futures::future::ready(Ok::<bool, GateError>(check())).boxed()),
        }
    }

    pub fn from_async<F, Fut>(check: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, GateError>> + Send + 'static,
    {
        Self {
            check: Arc::new(move || check().boxed()),
        }
    }

    pub async fn evaluate(&self) -> Result<bool, GateError> {
        (self.check)().await
    }
}

impl fmt::Debug for CloseGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseGate").finish_non_exhaustive()
    }
}
