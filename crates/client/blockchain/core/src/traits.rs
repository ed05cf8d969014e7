//! Ledger abstraction traits.
//!
//! This module defines a layered ledger abstraction:
//! - Layer 1: LedgerReader, LedgerWriter, IdentityService (game domain)
//! - Layer 2: GameLedger (composite trait)

use async_trait::async_trait;

use crate::types::{AdvanceRoom, AuthSession, PlayerAccount, TransactionRef};
use game_core::ViviState;

// ============================================================================
// Error Types
// ============================================================================

/// Transport layer errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request may or may not have reached the backend.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend could not be reached; nothing was sent.
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    /// The backend answered with a non-success status.
    #[error("Backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TransportError {
    /// True when the outcome of the request is unknown: the write may have
    /// been applied even though no answer came back.
    pub fn is_ambiguous(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Unreachable(_) | Self::Serialization(_) | Self::Config(_) => false,
        }
    }
}

/// Ledger read/write errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("No ledger state for contract {0}")]
    NotFound(String),

    /// The ledger refused the write; nothing was applied.
    #[error("Ledger rejected the call: {0}")]
    Rejected(String),

    #[error("Invalid ledger data: {0}")]
    InvalidData(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl LedgerError {
    pub fn is_ambiguous(&self) -> bool {
        match self {
            Self::Transport(err) => err.is_ambiguous(),
            _ => false,
        }
    }
}

/// Sign-up and login errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Account already exists: {0}")]
    AccountExists(String),

    #[error("Wallet provisioning failed: {0}")]
    Provisioning(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

// ============================================================================
// Layer 1: Game Domain Traits
// ============================================================================

/// Read access to the player's progress record.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Fetch the current ViviState for the account's contract.
    async fn read_state(&self, account: &PlayerAccount) -> Result<ViviState, LedgerError>;
}

/// Write access to the player's progress record.
#[async_trait]
pub trait LedgerWriter: Send + Sync {
    /// Submit the "advance room" call against the account's contract.
    ///
    /// Success means the ledger's room index moved forward by one and its
    /// health dropped by `call.damage` (plus `call.heal`).
    async fn advance_room(
        &self,
        account: &PlayerAccount,
        call: AdvanceRoom,
    ) -> Result<TransactionRef, LedgerError>;
}

/// Identity and custodial-wallet provisioning.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Create an account. Provisions a wallet and a per-player contract.
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError>;

    /// Log in and retrieve the existing wallet mapping, if any.
    async fn log_in(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError>;
}

// ============================================================================
// Layer 2: Composite Trait
// ============================================================================

/// Everything the game loop needs from a ledger backend.
pub trait GameLedger: LedgerReader + LedgerWriter + Send + Sync {
    /// Backend name (e.g., "starknet", "memory").
    fn name(&self) -> &str;

    /// Network name (e.g., "sepolia", "local").
    fn network(&self) -> &str;
}
