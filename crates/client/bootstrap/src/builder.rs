//! Builds the ledger backend, player session, and runtime used by front-ends.
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::info;

use client_blockchain_core::{AuthMode, GameLedger, InMemoryLedger};
use client_blockchain_starknet::StarknetBackendClient;
use runtime::{Runtime, SessionContext};

use crate::config::{BackendKind, ClientConfig, Credentials};
use crate::session::establish_session;

const OFFLINE_EMAIL: &str = "guest@localhost";

/// Builder that assembles the ledger, session, and runtime for clients.
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub async fn build(self) -> Result<ClientSetup> {
        let session_id = self
            .config
            .session_id
            .clone()
            .unwrap_or_else(generate_session_id);

        let (ledger, context) = match &self.config.backend {
            BackendKind::Offline => {
                let ledger = InMemoryLedger::new();
                // The in-memory ledger starts empty, so offline play always
                // provisions a fresh account.
                let credentials = Credentials {
                    mode: AuthMode::Signup,
                    ..self.config.credentials.clone().unwrap_or_else(|| Credentials {
                        email: OFFLINE_EMAIL.to_string(),
                        password: String::new(),
                        mode: AuthMode::Signup,
                    })
                };
                let context = establish_session(&ledger, Some(&credentials), &session_id)
                    .await
                    .context("failed to provision offline account")?;
                (Arc::new(ledger) as Arc<dyn GameLedger>, context)
            }
            BackendKind::Starknet(starknet) => {
                let client = StarknetBackendClient::new(starknet.clone())
                    .context("failed to create backend client")?;
                let context =
                    establish_session(&client, self.config.credentials.as_ref(), &session_id)
                        .await?;
                (Arc::new(client) as Arc<dyn GameLedger>, context)
            }
        };

        info!(
            target: "bootstrap",
            backend = self.config.backend.name(),
            session = %session_id,
            wallet = context.address().unwrap_or("none"),
            "session established"
        );

        let mut builder = Runtime::builder()
            .config(self.config.runtime_config())
            .session(context)
            .ledger(ledger);

        if let Some(seed) = self.config.seed {
            builder = builder.seed(seed);
        }

        let runtime = builder.build().await.context("failed to start runtime")?;

        Ok(ClientSetup {
            config: self.config,
            runtime,
        })
    }
}

pub struct ClientSetup {
    pub config: ClientConfig,
    pub runtime: Runtime,
}

impl ClientSetup {
    pub fn session(&self) -> &SessionContext {
        self.runtime.context()
    }
}

/// Session identifier derived from the current Unix time.
pub fn generate_session_id() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{secs}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_setup_provisions_a_wallet() {
        let config = ClientConfig {
            seed: Some(7),
            session_id: Some("offline-test".into()),
            ..ClientConfig::default()
        };

        let setup = ClientBuilder::new(config).build().await.expect("offline setup");
        assert!(setup.session().has_wallet());
        assert_eq!(setup.session().session_id, "offline-test");

        let snapshot = setup.runtime.handle().snapshot().await.expect("snapshot");
        assert_eq!(snapshot.room, 0);
        assert_eq!(snapshot.vivi.map(|v| v.health_points), Some(10));

        setup.runtime.shutdown().await.expect("shutdown");
    }

    #[test]
    fn generated_session_ids_are_prefixed() {
        assert!(generate_session_id().starts_with("session_"));
    }
}
