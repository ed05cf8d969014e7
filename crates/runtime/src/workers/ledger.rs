//! Ledger worker that performs room-advance calls.
//!
//! The simulation never awaits the ledger. It hands each advance request to
//! this worker and keeps running; the verdict comes back as an
//! [`AdvanceCompletion`] which the simulation applies to its session.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use client_blockchain_core::{
    AdvanceRoom, GameLedger, LedgerError, LedgerReader, LedgerWriter, PlayerAccount,
    TransactionRef,
};
use game_core::{AdvanceRequest, AdvanceTicket};

use super::LedgerMetrics;
use crate::events::{Event, EventBus, LedgerEvent};

pub(crate) const NO_WALLET_REASON: &str = "no wallet linked to this session";

/// One advance call to perform.
#[derive(Debug, Clone)]
pub(crate) struct AdvanceJob {
    pub request: AdvanceRequest,
    pub account: Option<PlayerAccount>,
    /// Ledger room before this advance, when the session mirrors it.
    pub baseline_room: Option<u32>,
}

/// Verdict for one advance call.
#[derive(Debug, Clone)]
pub(crate) struct AdvanceCompletion {
    pub ticket: AdvanceTicket,
    pub result: Result<Confirmation, String>,
}

#[derive(Debug, Clone)]
pub(crate) struct Confirmation {
    pub transaction: Option<TransactionRef>,
    pub reconciled: bool,
}

impl AdvanceCompletion {
    fn failed(ticket: AdvanceTicket, reason: impl Into<String>) -> Self {
        Self {
            ticket,
            result: Err(reason.into()),
        }
    }

    fn confirmed(ticket: AdvanceTicket, transaction: Option<TransactionRef>) -> Self {
        let reconciled = transaction.is_none();
        Self {
            ticket,
            result: Ok(Confirmation {
                transaction,
                reconciled,
            }),
        }
    }

    /// The ledger event announcing this verdict.
    pub fn to_event(&self) -> LedgerEvent {
        match &self.result {
            Ok(confirmation) => LedgerEvent::AdvanceConfirmed {
                ticket: self.ticket,
                transaction: confirmation.transaction.clone(),
                reconciled: confirmation.reconciled,
            },
            Err(reason) => LedgerEvent::AdvanceFailed {
                ticket: self.ticket,
                reason: reason.clone(),
            },
        }
    }
}

/// Background task that owns the ledger connection.
///
/// Jobs are processed one at a time. The session never issues a second
/// ticket while one is outstanding, so there is no queue to speak of.
pub(crate) struct LedgerWorker {
    ledger: Arc<dyn GameLedger>,
    job_rx: mpsc::Receiver<AdvanceJob>,
    completion_tx: mpsc::Sender<AdvanceCompletion>,
    event_bus: EventBus,
    metrics: Arc<LedgerMetrics>,
    reconcile_ambiguous: bool,
}

impl LedgerWorker {
    pub fn new(
        ledger: Arc<dyn GameLedger>,
        job_rx: mpsc::Receiver<AdvanceJob>,
        completion_tx: mpsc::Sender<AdvanceCompletion>,
        event_bus: EventBus,
        metrics: Arc<LedgerMetrics>,
        reconcile_ambiguous: bool,
    ) -> Self {
        info!(
            target: "runtime::ledger",
            ledger = ledger.name(),
            network = ledger.network(),
            "ledger worker initialized"
        );
        Self {
            ledger,
            job_rx,
            completion_tx,
            event_bus,
            metrics,
            reconcile_ambiguous,
        }
    }

    pub async fn run(mut self) {
        while let Some(job) = self.job_rx.recv().await {
            let completion = self.process(job).await;
            if self.completion_tx.send(completion).await.is_err() {
                debug!(target: "runtime::ledger", "completion channel closed (simulation stopped)");
                break;
            }
        }
        debug!(target: "runtime::ledger", "ledger worker stopped");
    }

    async fn process(&self, job: AdvanceJob) -> AdvanceCompletion {
        let AdvanceRequest {
            ticket,
            damage,
            heal,
        } = job.request;

        let Some(account) = job.account else {
            warn!(target: "runtime::ledger", room = ticket.room, "advance without a wallet");
            return AdvanceCompletion::failed(ticket, NO_WALLET_REASON);
        };

        self.metrics.record_submitted();
        self.event_bus
            .publish(Event::Ledger(LedgerEvent::AdvanceSubmitted { ticket, damage }));
        info!(
            target: "runtime::ledger",
            room = ticket.room,
            damage,
            user = %account.user_id,
            "submitting room advance"
        );

        let started = Instant::now();
        let call = AdvanceRoom { damage, heal };
        let completion = match self.ledger.advance_room(&account, call).await {
            Ok(transaction) => {
                info!(
                    target: "runtime::ledger",
                    room = ticket.room,
                    tx = %transaction,
                    "room advance accepted"
                );
                AdvanceCompletion::confirmed(ticket, Some(transaction))
            }
            Err(err) if err.is_ambiguous() && self.reconcile_ambiguous => {
                self.reconcile(ticket, &account, job.baseline_room, err)
                    .await
            }
            Err(err) => {
                warn!(target: "runtime::ledger", room = ticket.room, %err, "room advance rejected");
                AdvanceCompletion::failed(ticket, err.to_string())
            }
        };

        let elapsed = started.elapsed();
        match &completion.result {
            Ok(confirmation) => self
                .metrics
                .record_confirmed(elapsed, confirmation.reconciled),
            Err(_) => self.metrics.record_failed(elapsed),
        }
        completion
    }

    /// Decides an ambiguous failure by reading the contract back.
    ///
    /// The write landed if the ledger now sits exactly one room past where it
    /// was before the call.
    async fn reconcile(
        &self,
        ticket: AdvanceTicket,
        account: &PlayerAccount,
        baseline_room: Option<u32>,
        err: LedgerError,
    ) -> AdvanceCompletion {
        let Some(baseline) = baseline_room else {
            warn!(
                target: "runtime::ledger",
                room = ticket.room,
                %err,
                "ambiguous failure with no mirrored ledger state"
            );
            return AdvanceCompletion::failed(ticket, err.to_string());
        };

        warn!(target: "runtime::ledger", room = ticket.room, %err, "ambiguous failure, reading ledger back");
        match self.ledger.read_state(account).await {
            Ok(state) if state.room == baseline + 1 => {
                info!(
                    target: "runtime::ledger",
                    room = ticket.room,
                    ledger_room = state.room,
                    "room advance confirmed by read-back"
                );
                AdvanceCompletion::confirmed(ticket, None)
            }
            Ok(state) => AdvanceCompletion::failed(
                ticket,
                format!("{err} (ledger still at room {})", state.room),
            ),
            Err(read_err) => AdvanceCompletion::failed(
                ticket,
                format!("{err} (read-back failed: {read_err})"),
            ),
        }
    }
}
