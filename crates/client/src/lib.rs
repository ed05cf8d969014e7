//! Top-level client orchestrating the Runtime and Frontend layers.
//!
//! # Architecture
//!
//! ```text
//! Client (Top-level container)
//!   ├─→ Runtime (Game session, ledger worker, event bus)
//!   ├─→ Frontend (UI layer - CLI, GUI, etc.)
//!   └─→ Ledger monitor (logs room-advance progress)
//! ```
//!
//! The runtime is assembled by `client-bootstrap`; the frontend only ever
//! sees a [`RuntimeHandle`].

mod builder;

pub use builder::ClientBuilder;

// Re-export Frontend trait from client-frontend-core
pub use client_frontend_core::Frontend;

use anyhow::Result;
use runtime::{Event, LedgerEvent, RuntimeHandle, Topic};
use tokio::sync::broadcast::error::RecvError;

/// Top-level client container.
///
/// # Lifecycle
///
/// 1. Client::builder() collects an already running runtime and a frontend
/// 2. Client::run() starts the ledger monitor in the background
/// 3. Client::run() transfers control to the frontend (blocking)
/// 4. On frontend exit the runtime is shut down and its workers joined
pub struct Client {
    runtime: runtime::Runtime,
    frontend: Box<dyn Frontend>,
}

impl Client {
    /// Create a new ClientBuilder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Run the client until the frontend returns.
    ///
    /// # Errors
    ///
    /// Returns the frontend's error, or a runtime shutdown failure.
    pub async fn run(self) -> Result<()> {
        let handle = self.runtime.handle();

        let monitor_task = tokio::spawn(run_ledger_monitor(handle.clone()));

        // Run frontend (blocks until user quits)
        let mut frontend = self.frontend;
        let frontend_result = frontend.run(handle.clone()).await;

        let metrics = handle.ledger_metrics();
        tracing::info!(
            submitted = metrics.submitted(),
            confirmed = metrics.confirmed(),
            failed = metrics.failed(),
            reconciled = metrics.reconciled(),
            average_ms = metrics.average_call_time().map(|d| d.as_millis() as u64),
            "ledger summary"
        );

        drop(handle);
        monitor_task.abort();
        let _ = monitor_task.await;

        self.runtime.shutdown().await?;

        frontend_result
    }
}

/// Background task logging ledger progress.
async fn run_ledger_monitor(handle: RuntimeHandle) {
    let mut events = handle.subscribe(Topic::Ledger);
    drop(handle);

    loop {
        match events.recv().await {
            Ok(Event::Ledger(event)) => log_ledger_event(&event),
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Ledger monitor dropped {} events", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }

    tracing::debug!("Ledger monitor stopped");
}

fn log_ledger_event(event: &LedgerEvent) {
    match event {
        LedgerEvent::AdvanceSubmitted { ticket, damage } => tracing::info!(
            room = ticket.room,
            ticket = ticket.id,
            damage,
            "room advance submitted"
        ),
        LedgerEvent::AdvanceConfirmed {
            ticket,
            transaction,
            reconciled,
        } => tracing::info!(
            room = ticket.room,
            ticket = ticket.id,
            tx = transaction.as_ref().map(|tx| tx.as_str()).unwrap_or("unknown"),
            reconciled,
            "room advance confirmed"
        ),
        LedgerEvent::AdvanceFailed { ticket, reason } => tracing::warn!(
            room = ticket.room,
            ticket = ticket.id,
            %reason,
            "room advance failed"
        ),
    }
}
