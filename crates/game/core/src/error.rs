//! Error infrastructure for game-core.
//!
//! The simulation itself never fails: spawn requests are clamped and ledger
//! failures degrade to a retryable state. Errors here describe commands that
//! the session rejects without touching its state.

use crate::event::AdvanceTicket;
use crate::room::RoomPhase;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same command may succeed later
/// - **Validation**: the command is invalid in the current state
/// - **Internal**: unexpected inconsistency between driver and session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str;
}

/// Commands rejected by [`GameSession`](crate::session::GameSession).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("restart is only accepted after game over (phase: {phase})")]
    NotGameOver { phase: RoomPhase },

    #[error("no room advance is outstanding")]
    NoPendingAdvance,

    #[error("stale advance ticket {got:?}, outstanding is {outstanding:?}")]
    StaleTicket {
        outstanding: AdvanceTicket,
        got: AdvanceTicket,
    },
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotGameOver { .. } => ErrorSeverity::Validation,
            Self::NoPendingAdvance => ErrorSeverity::Recoverable,
            Self::StaleTicket { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotGameOver { .. } => "SESSION_NOT_GAME_OVER",
            Self::NoPendingAdvance => "SESSION_NO_PENDING_ADVANCE",
            Self::StaleTicket { .. } => "SESSION_STALE_TICKET",
        }
    }
}
