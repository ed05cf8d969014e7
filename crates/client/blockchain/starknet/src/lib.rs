//! Starknet ledger integration for the Vivi game.
//!
//! The game never talks to Starknet directly. A backend fronts the Vivi
//! contracts and the custodial wallet service:
//!
//! ```text
//! client-blockchain-starknet ──HTTP──▶ backend ──▶ identity store
//!                                         └──────▶ wallet service ──▶ Starknet
//! ```
//!
//! - `POST /api/auth` signs up (provisioning a wallet and contract) or logs in
//! - `GET /api/vivi?uid=` reads the player's contract state
//! - `POST /api/external` executes `next_room` with the custodial key
//!
//! # Usage
//!
//! ```ignore
//! use client_blockchain_starknet::{StarknetBackendClient, StarknetConfig};
//! use client_blockchain_core::IdentityService;
//!
//! let config = StarknetConfig::from_env()?;
//! let client = StarknetBackendClient::new(config)?;
//! let session = client.log_in("vivi@example.com", "secret").await?;
//! ```

pub mod client;
pub mod config;
pub mod wire;

pub use client::StarknetBackendClient;
pub use config::{StarknetConfig, StarknetNetwork};
