//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination so clients can bubble them up
//! with consistent context. Action-level failures (a blocked move, an
//! unknown token) are not runtime errors: they are reported as events and
//! the queue moves on.
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("background task join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a level to be configured before building")]
    MissingLevel,

    #[error("invalid runtime configuration: {0}")]
    InvalidConfig(String),

    #[error("internal controller error: {0}")]
    Internal(#[source] game_core::ExecuteError),
}
