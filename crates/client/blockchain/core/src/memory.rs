//! In-memory ledger for offline play and tests.
//!
//! Simulates the identity service and the per-player Vivi contracts without a
//! network. Failures can be injected to exercise the room-advance error paths.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::traits::{
    GameLedger, IdentityError, IdentityService, LedgerError, LedgerReader, LedgerWriter,
    TransportError,
};
use crate::types::{AdvanceRoom, AuthSession, PlayerAccount, TransactionRef, WalletInfo};
use game_core::{GameConfig, ViviState};

#[derive(Debug, Default)]
struct Account {
    password: String,
    user_id: String,
    wallet: Option<WalletInfo>,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<String, Account>,
    contracts: HashMap<String, ViviState>,
    next_id: u64,
    writes: u64,
    fail_next_writes: u32,
    fail_writes_after_apply: u32,
    fail_next_reads: u32,
}

/// Ledger double that keeps every contract in a map.
///
/// Cloning shares the underlying state, so a test can keep one clone to
/// inspect or script the ledger while the runtime owns another.
#[derive(Debug, Clone)]
pub struct InMemoryLedger {
    inner: Arc<Mutex<Inner>>,
    latency: Option<Duration>,
    starting_health: u32,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            inner: Arc::default(),
            latency: None,
            starting_health: GameConfig::DEFAULT_MAX_HEALTH,
        }
    }

    /// Delays every call by `latency` (virtual time under a paused runtime).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Health a freshly provisioned contract starts with.
    pub fn with_starting_health(mut self, health: u32) -> Self {
        self.starting_health = health;
        self
    }

    /// Registers an account whose contract already holds `state`.
    pub fn insert_account(&self, email: &str, password: &str, state: ViviState) -> PlayerAccount {
        let mut inner = self.lock();
        let id = inner.allocate_id();
        let wallet = WalletInfo {
            address: state.owner.clone(),
            pk: format!("custodial-key-{id}"),
            vivi: state.contract_address.clone(),
        };
        let user_id = format!("user-{id}");
        inner
            .contracts
            .insert(state.contract_address.clone(), state);
        inner.accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user_id: user_id.clone(),
                wallet: Some(wallet.clone()),
            },
        );
        PlayerAccount { user_id, wallet }
    }

    /// Current contract state, bypassing injected read failures.
    pub fn state_of(&self, contract: &str) -> Option<ViviState> {
        self.lock().contracts.get(contract).cloned()
    }

    /// The next `count` writes fail without touching the contract.
    pub fn fail_next_writes(&self, count: u32) {
        self.lock().fail_next_writes = count;
    }

    /// The next `count` writes are applied but answered with a transport
    /// error, as if the connection dropped after submission.
    pub fn fail_writes_after_apply(&self, count: u32) {
        self.lock().fail_writes_after_apply = count;
    }

    pub fn fail_next_reads(&self, count: u32) {
        self.lock().fail_next_reads = count;
    }

    /// Number of write attempts received, failed ones included.
    pub fn write_count(&self) -> u64 {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[async_trait]
impl LedgerReader for InMemoryLedger {
    async fn read_state(&self, account: &PlayerAccount) -> Result<ViviState, LedgerError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        if inner.fail_next_reads > 0 {
            inner.fail_next_reads -= 1;
            return Err(TransportError::Network("injected read failure".into()).into());
        }
        inner
            .contracts
            .get(&account.wallet.vivi)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(account.wallet.vivi.clone()))
    }
}

#[async_trait]
impl LedgerWriter for InMemoryLedger {
    async fn advance_room(
        &self,
        account: &PlayerAccount,
        call: AdvanceRoom,
    ) -> Result<TransactionRef, LedgerError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        inner.writes += 1;

        if inner.fail_next_writes > 0 {
            inner.fail_next_writes -= 1;
            return Err(LedgerError::Rejected("injected write failure".into()));
        }

        let contract = inner
            .contracts
            .get_mut(&account.wallet.vivi)
            .ok_or_else(|| LedgerError::NotFound(account.wallet.vivi.clone()))?;
        contract.apply_advance(call.damage);
        contract.health_points = contract.health_points.saturating_add(call.heal);
        debug!(
            target: "blockchain::memory",
            contract = %account.wallet.vivi,
            room = contract.room,
            health = contract.health_points,
            "applied next_room"
        );

        if inner.fail_writes_after_apply > 0 {
            inner.fail_writes_after_apply -= 1;
            return Err(TransportError::Network("connection reset after submit".into()).into());
        }

        let id = inner.allocate_id();
        Ok(TransactionRef(format!("0x{id:064x}")))
    }
}

#[async_trait]
impl IdentityService for InMemoryLedger {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError> {
        self.simulate_latency().await;
        let mut inner = self.lock();
        if inner.accounts.contains_key(email) {
            return Err(IdentityError::AccountExists(email.to_string()));
        }

        let id = inner.allocate_id();
        let wallet = WalletInfo {
            address: format!("0x{:064x}", id),
            pk: format!("custodial-key-{id}"),
            vivi: format!("0x{:064x}", id << 32),
        };
        inner.contracts.insert(
            wallet.vivi.clone(),
            ViviState {
                health_points: self.starting_health,
                room: 0,
                owner: wallet.address.clone(),
                contract_address: wallet.vivi.clone(),
            },
        );
        let user_id = format!("user-{id}");
        inner.accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user_id: user_id.clone(),
                wallet: Some(wallet.clone()),
            },
        );

        Ok(AuthSession {
            user_id,
            email: email.to_string(),
            wallet: Some(wallet),
        })
    }

    async fn log_in(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError> {
        self.simulate_latency().await;
        let inner = self.lock();
        match inner.accounts.get(email) {
            Some(account) if account.password == password => Ok(AuthSession {
                user_id: account.user_id.clone(),
                email: email.to_string(),
                wallet: account.wallet.clone(),
            }),
            _ => Err(IdentityError::InvalidCredentials(
                "Invalid login credentials".into(),
            )),
        }
    }
}

impl GameLedger for InMemoryLedger {
    fn name(&self) -> &str {
        "memory"
    }

    fn network(&self) -> &str {
        "local"
    }
}
