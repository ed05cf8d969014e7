//! Unified error types surfaced by the runtime API.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{ErrorSeverity, GameError, SessionError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a ledger to be configured before building")]
    MissingLedger,

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl RuntimeError {
    /// Channel and join failures mean the runtime is gone.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Session(err) => err.severity(),
            RuntimeError::MissingLedger => ErrorSeverity::Validation,
            RuntimeError::CommandChannelClosed
            | RuntimeError::ReplyChannelClosed(_)
            | RuntimeError::WorkerJoin(_) => ErrorSeverity::Internal,
        }
    }
}
