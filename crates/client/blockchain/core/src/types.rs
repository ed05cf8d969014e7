//! Common types for ledger interactions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Custodial wallet mapping returned by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletInfo {
    /// Account address on the ledger network.
    pub address: String,
    /// Reference to the custodial signing key. Never a raw private key.
    pub pk: String,
    /// Address of the player's Vivi contract instance.
    pub vivi: String,
}

/// Account the ledger calls act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAccount {
    pub user_id: String,
    pub wallet: WalletInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[strum(to_string = "signup", serialize = "sign-up")]
    Signup,
    #[strum(to_string = "login", serialize = "log-in")]
    Login,
}

/// Result of a successful sign-up or login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: String,
    pub email: String,
    /// Absent when the account has no provisioned wallet.
    pub wallet: Option<WalletInfo>,
}

impl AuthSession {
    pub fn account(&self) -> Option<PlayerAccount> {
        self.wallet.as_ref().map(|wallet| PlayerAccount {
            user_id: self.user_id.clone(),
            wallet: wallet.clone(),
        })
    }
}

/// Arguments of the `next_room` contract entrypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceRoom {
    pub damage: u32,
    /// Always zero in current play.
    pub heal: u32,
}

impl AdvanceRoom {
    pub fn new(damage: u32) -> Self {
        Self { damage, heal: 0 }
    }
}

/// Transaction identifier returned by a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionRef(pub String);

impl TransactionRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Backend-specific configuration.
///
/// This is a trait to allow different backends to provide their own config types.
pub trait LedgerConfig: Send + Sync {
    /// Human-readable network name (e.g., "sepolia")
    fn network_name(&self) -> &str;

    /// Backend endpoint URL
    fn endpoint(&self) -> &str;

    /// Validate configuration before any request is made
    fn validate(&self) -> Result<(), String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_mode_parses_backend_spellings() {
        assert_eq!("signup".parse::<AuthMode>(), Ok(AuthMode::Signup));
        assert_eq!("log-in".parse::<AuthMode>(), Ok(AuthMode::Login));
        assert_eq!(AuthMode::Signup.to_string(), "signup");
        assert_eq!(serde_json::to_value(AuthMode::Login).unwrap(), "login");
    }

    #[test]
    fn account_requires_a_wallet() {
        let mut session = AuthSession {
            user_id: "u1".into(),
            email: "a@b.c".into(),
            wallet: None,
        };
        assert_eq!(session.account(), None);

        session.wallet = Some(WalletInfo {
            address: "0x1".into(),
            pk: "pk".into(),
            vivi: "0x2".into(),
        });
        assert_eq!(session.account().map(|a| a.user_id), Some("u1".to_string()));
    }
}
