//! Event payloads published by the runtime workers.

use serde::{Deserialize, Serialize};

use client_blockchain_core::TransactionRef;
use game_core::AdvanceTicket;

/// Progress of one room-advance ledger call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// The call was handed to the ledger.
    AdvanceSubmitted { ticket: AdvanceTicket, damage: u32 },

    /// The ledger accepted the advance.
    ///
    /// `reconciled` is set when the write itself reported an ambiguous
    /// failure and success was established by re-reading the contract; the
    /// transaction reference is unknown in that case.
    AdvanceConfirmed {
        ticket: AdvanceTicket,
        transaction: Option<TransactionRef>,
        reconciled: bool,
    },

    AdvanceFailed { ticket: AdvanceTicket, reason: String },
}

impl LedgerEvent {
    pub fn ticket(&self) -> AdvanceTicket {
        match self {
            LedgerEvent::AdvanceSubmitted { ticket, .. }
            | LedgerEvent::AdvanceConfirmed { ticket, .. }
            | LedgerEvent::AdvanceFailed { ticket, .. } => *ticket,
        }
    }
}
