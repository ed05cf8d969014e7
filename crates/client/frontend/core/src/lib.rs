//! Cross-frontend primitives for presenting the game.
//!
//! Houses the message log, event handling, and view-model types that the
//! terminal client and any future graphical client can reuse.
pub mod config;
pub mod event;
pub mod format;
pub mod frontend;
pub mod message;
pub mod view_model;

pub use config::{FrontendConfig, MessageConfig};
pub use event::{EventConsumer, EventImpact};
pub use format::{entering_label, health_bar, room_label, short_address};
pub use frontend::Frontend;
pub use message::{MessageEntry, MessageLevel, MessageLog};
pub use view_model::{LedgerStatus, UiFrame, ViewState};
