//! JSON bodies exchanged with the game backend.

use serde::{Deserialize, Serialize};

use client_blockchain_core::{AdvanceRoom, AuthMode, PlayerAccount, WalletInfo};
use game_core::ViviState;

/// Contract entrypoint that advances the player's room.
pub const NEXT_ROOM_ENTRYPOINT: &str = "next_room";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub mode: AuthMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub user: Option<AuthUser>,
    #[serde(default)]
    pub wallet: Option<WalletInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViviResponse {
    pub success: bool,
    #[serde(default)]
    pub vivi: Option<ViviState>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCall {
    pub contract_address: String,
    pub entrypoint: String,
    pub calldata: Vec<String>,
}

impl ContractCall {
    pub fn next_room(contract: &str, call: AdvanceRoom) -> Self {
        Self {
            contract_address: contract.to_string(),
            entrypoint: NEXT_ROOM_ENTRYPOINT.to_string(),
            calldata: vec![call.damage.to_string(), call.heal.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalCallRequest {
    pub network: String,
    pub calls: Vec<ContractCall>,
    pub address: String,
    pub hashed_pk: String,
}

impl ExternalCallRequest {
    pub fn advance_room(network: &str, account: &PlayerAccount, call: AdvanceRoom) -> Self {
        Self {
            network: network.to_string(),
            calls: vec![ContractCall::next_room(&account.wallet.vivi, call)],
            address: account.wallet.address.clone(),
            hashed_pk: account.wallet.pk.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExternalCallResponse {
    #[serde(default)]
    pub result: Option<ExecutionResult>,
    #[serde(default)]
    pub error: Option<String>,
}
