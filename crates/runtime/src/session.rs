//! Per-player session context handed to the runtime at build time.

use client_blockchain_core::{AuthSession, PlayerAccount};
use game_core::ViviState;

/// Who is playing and what the ledger said about them when the session began.
///
/// The account is absent for offline play or when the identity service
/// returned no wallet; every room advance then fails. The ledger state is
/// absent when it could not be read, in which case the game starts in room 0
/// at full health.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionContext {
    pub session_id: String,
    pub email: Option<String>,
    pub account: Option<PlayerAccount>,
    pub vivi: Option<ViviState>,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Self::default()
        }
    }

    /// Context for an authenticated player.
    pub fn from_auth(session_id: impl Into<String>, auth: &AuthSession) -> Self {
        Self {
            session_id: session_id.into(),
            email: Some(auth.email.clone()),
            account: auth.account(),
            vivi: None,
        }
    }

    pub fn with_account(mut self, account: PlayerAccount) -> Self {
        self.account = Some(account);
        self
    }

    pub fn with_vivi(mut self, vivi: ViviState) -> Self {
        self.vivi = Some(vivi);
        self
    }

    pub fn has_wallet(&self) -> bool {
        self.account.is_some()
    }

    /// Wallet address, if the session is linked to one.
    pub fn address(&self) -> Option<&str> {
        self.account
            .as_ref()
            .map(|account| account.wallet.address.as_str())
    }
}
