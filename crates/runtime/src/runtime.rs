//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the simulation.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use client_blockchain_core::GameLedger;
use game_core::{GameConfig, GameSession, PcgRng, RngOracle};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::session::SessionContext;
use crate::workers::{LedgerMetrics, LedgerWorker, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Resolve ambiguous ledger failures by reading the contract back
    /// (default: true)
    pub reconcile_ambiguous: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            reconcile_ambiguous: true,
        }
    }
}

/// Main runtime that orchestrates the game simulation
///
/// Runtime owns workers and coordinates execution.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    context: SessionContext,
    sim_worker_handle: JoinHandle<()>,
    ledger_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Session the runtime was built for.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Shutdown the runtime gracefully
    ///
    /// Workers stop once every [`RuntimeHandle`] clone has been dropped. An
    /// in-flight ledger call is allowed to finish; its verdict is discarded.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;
        self.ledger_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        info!(target: "runtime", session = %self.context.session_id, "runtime shut down");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    context: SessionContext,
    ledger: Option<Arc<dyn GameLedger>>,
    seed: Option<u64>,
    rng: Option<Box<dyn RngOracle>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            context: SessionContext::default(),
            ledger: None,
            seed: None,
            rng: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Player account and ledger state to start from
    pub fn session(mut self, context: SessionContext) -> Self {
        self.context = context;
        self
    }

    /// Set required ledger backend
    pub fn ledger(mut self, ledger: Arc<dyn GameLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Seed the spawn RNG for a reproducible session.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Supply the spawn RNG directly. Takes precedence over [`Self::seed`].
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Build the runtime and spawn its workers.
    pub async fn build(self) -> Result<Runtime> {
        let ledger = self.ledger.ok_or(RuntimeError::MissingLedger)?;

        let rng: Box<dyn RngOracle> = match self.rng {
            Some(rng) => rng,
            None => {
                let seed = self.seed.unwrap_or_else(rand::random);
                info!(target: "runtime", seed, "seeding spawn rng");
                Box::new(PcgRng::new(seed))
            }
        };

        let session = GameSession::new(
            self.config.game_config.clone(),
            self.context.vivi.clone(),
            rng,
        );

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let metrics = Arc::new(LedgerMetrics::new());
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size.max(1));
        let (job_tx, job_rx) = mpsc::channel(4);
        let (completion_tx, completion_rx) = mpsc::channel(4);

        let ledger_worker = LedgerWorker::new(
            ledger,
            job_rx,
            completion_tx,
            event_bus.clone(),
            Arc::clone(&metrics),
            self.config.reconcile_ambiguous,
        );
        let sim_worker = SimulationWorker::new(
            session,
            self.context.account.clone(),
            command_rx,
            job_tx,
            completion_rx,
            event_bus.clone(),
        );

        let ledger_worker_handle = tokio::spawn(ledger_worker.run());
        let sim_worker_handle = tokio::spawn(sim_worker.run());

        info!(
            target: "runtime",
            session = %self.context.session_id,
            wallet = self.context.has_wallet(),
            "runtime started"
        );

        Ok(Runtime {
            handle: RuntimeHandle::new(command_tx, event_bus, metrics),
            context: self.context,
            sim_worker_handle,
            ledger_worker_handle,
        })
    }
}
