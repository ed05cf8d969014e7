//! Ledger abstraction layer for the Vivi game.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: GameLedger (composite trait)
//!          ├── LedgerReader
//!          └── LedgerWriter
//!
//! Layer 1: Domain Traits (ledger state, room advance, identity)
//! ```
//!
//! The ledger is the system of record for cross-session progress. The game
//! only ever reads the player's [`ViviState`] and submits "advance room"
//! writes; custody of keys and on-chain consensus stay behind the backend.
//!
//! # Usage
//!
//! ```ignore
//! use client_blockchain_core::{AdvanceRoom, GameLedger};
//!
//! async fn advance(ledger: &dyn GameLedger, account: &PlayerAccount) {
//!     let before = ledger.read_state(account).await?;
//!     ledger.advance_room(account, AdvanceRoom::new(2)).await?;
//! }
//! ```

pub mod memory;
pub mod traits;
pub mod types;

pub use memory::InMemoryLedger;

pub use traits::{
    GameLedger, IdentityError, IdentityService, LedgerError, LedgerReader, LedgerWriter,
    TransportError,
};

pub use types::{
    AdvanceRoom, AuthMode, AuthSession, LedgerConfig, PlayerAccount, TransactionRef, WalletInfo,
};

pub use game_core::ViviState;
