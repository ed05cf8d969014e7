//! HTTP client for the game backend.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use client_blockchain_core::{
    AdvanceRoom, AuthMode, AuthSession, GameLedger, IdentityError, IdentityService, LedgerConfig,
    LedgerError, LedgerReader, LedgerWriter, PlayerAccount, TransactionRef, TransportError,
};
use game_core::ViviState;

use crate::config::StarknetConfig;
use crate::wire::{AuthRequest, AuthResponse, ExternalCallRequest, ExternalCallResponse, ViviResponse};

/// Ledger and identity client backed by the game's HTTP API.
#[derive(Debug, Clone)]
pub struct StarknetBackendClient {
    config: StarknetConfig,
    http: reqwest::Client,
}

impl StarknetBackendClient {
    pub fn new(config: StarknetConfig) -> Result<Self, TransportError> {
        config.validate().map_err(TransportError::Config)?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| TransportError::Config(err.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &StarknetConfig {
        &self.config
    }

    fn transport_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.config.request_timeout.as_millis() as u64)
        } else if err.is_connect() {
            TransportError::Unreachable(err.to_string())
        } else if err.is_decode() {
            TransportError::Serialization(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
        mode: AuthMode,
    ) -> Result<AuthSession, IdentityError> {
        let url = self.config.url("/api/auth");
        debug!(target: "blockchain::starknet", %url, %mode, "authenticating");

        let response = self
            .http
            .post(&url)
            .json(&AuthRequest {
                email,
                password,
                mode,
            })
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.transport_error(err))?;
        let parsed: Option<AuthResponse> = serde_json::from_str(&body).ok();

        if status == StatusCode::BAD_REQUEST {
            let message = parsed
                .and_then(|r| r.error)
                .unwrap_or_else(|| body.clone());
            return Err(match mode {
                AuthMode::Signup if message.to_lowercase().contains("already") => {
                    IdentityError::AccountExists(email.to_string())
                }
                _ => IdentityError::InvalidCredentials(message),
            });
        }
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parsed = parsed.ok_or_else(|| {
            TransportError::Serialization(format!("unexpected auth response: {body}"))
        })?;
        let user = match (parsed.success, parsed.user) {
            (true, Some(user)) => user,
            _ => {
                return Err(IdentityError::InvalidCredentials(
                    parsed.error.unwrap_or_else(|| "authentication failed".into()),
                ));
            }
        };

        if mode == AuthMode::Signup && parsed.wallet.is_none() {
            return Err(IdentityError::Provisioning(
                "backend returned no wallet for the new account".into(),
            ));
        }

        info!(
            target: "blockchain::starknet",
            user = %user.id,
            has_wallet = parsed.wallet.is_some(),
            "authenticated"
        );
        Ok(AuthSession {
            user_id: user.id,
            email: email.to_string(),
            wallet: parsed.wallet,
        })
    }
}

#[async_trait]
impl LedgerReader for StarknetBackendClient {
    async fn read_state(&self, account: &PlayerAccount) -> Result<ViviState, LedgerError> {
        let response = self
            .http
            .get(self.config.url("/api/vivi"))
            .query(&[("uid", account.user_id.as_str())])
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LedgerError::NotFound(account.wallet.vivi.clone()));
        }
        let body = response
            .text()
            .await
            .map_err(|err| self.transport_error(err))?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parsed: ViviResponse = serde_json::from_str(&body)
            .map_err(|err| LedgerError::InvalidData(format!("{err}: {body}")))?;
        match (parsed.success, parsed.vivi) {
            (true, Some(vivi)) => {
                debug!(
                    target: "blockchain::starknet",
                    room = vivi.room,
                    health = vivi.health_points,
                    "read vivi state"
                );
                Ok(vivi)
            }
            _ => Err(LedgerError::InvalidData(
                parsed.error.unwrap_or_else(|| "missing vivi state".into()),
            )),
        }
    }
}

#[async_trait]
impl LedgerWriter for StarknetBackendClient {
    async fn advance_room(
        &self,
        account: &PlayerAccount,
        call: AdvanceRoom,
    ) -> Result<TransactionRef, LedgerError> {
        let body = ExternalCallRequest::advance_room(self.config.network.as_str(), account, call);
        info!(
            target: "blockchain::starknet",
            contract = %account.wallet.vivi,
            damage = call.damage,
            heal = call.heal,
            "submitting next_room"
        );

        let response = self
            .http
            .post(self.config.url("/api/external"))
            .json(&body)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| self.transport_error(err))?;

        if status == StatusCode::BAD_REQUEST {
            return Err(LedgerError::Rejected(text));
        }
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        let parsed: Option<ExternalCallResponse> = serde_json::from_str(&text).ok();
        if let Some(error) = parsed.as_ref().and_then(|r| r.error.clone()) {
            return Err(LedgerError::Rejected(error));
        }
        let hash = parsed
            .and_then(|r| r.result)
            .and_then(|r| r.transaction_hash);
        match hash {
            Some(hash) => Ok(TransactionRef(hash)),
            None => {
                warn!(
                    target: "blockchain::starknet",
                    response = %text,
                    "next_room succeeded without a transaction hash"
                );
                Ok(TransactionRef(String::new()))
            }
        }
    }
}

#[async_trait]
impl IdentityService for StarknetBackendClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError> {
        self.authenticate(email, password, AuthMode::Signup).await
    }

    async fn log_in(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError> {
        self.authenticate(email, password, AuthMode::Login).await
    }
}

impl GameLedger for StarknetBackendClient {
    fn name(&self) -> &str {
        "starknet"
    }

    fn network(&self) -> &str {
        self.config.network.as_str()
    }
}
