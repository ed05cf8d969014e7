//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the game session and its clock, while the
//! ledger worker performs room-advance calls off the simulation task.

mod ledger;
mod metrics;
mod simulation;

pub(crate) use ledger::{AdvanceCompletion, AdvanceJob, LedgerWorker};
pub use metrics::LedgerMetrics;
pub(crate) use simulation::{Command, SimulationWorker};
