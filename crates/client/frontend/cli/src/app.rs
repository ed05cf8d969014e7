//! CLI frontend implementation.
use anyhow::Result;
use async_trait::async_trait;
use game_core::PlayArea;
use runtime::{RuntimeHandle, Topic};

use crate::config::CliConfig;
use crate::event::EventLoop;
use crate::input::InputHandler;
use crate::presentation::terminal;
use client_frontend_core::{EventConsumer, Frontend, FrontendConfig, ViewState};

/// CLI frontend implementation.
///
/// Pure UI layer that receives a RuntimeHandle for communication.
/// Does NOT own the Runtime - that's the Client's responsibility.
pub struct CliFrontend {
    config: FrontendConfig,
    cli_config: CliConfig,
    play_area: PlayArea,
    address: Option<String>,
}

impl CliFrontend {
    /// Create a new CLI frontend for a room of `play_area` pixels owned by
    /// the wallet at `address`, if any.
    pub fn new(
        config: FrontendConfig,
        cli_config: CliConfig,
        play_area: PlayArea,
        address: Option<String>,
    ) -> Self {
        Self {
            config,
            cli_config,
            play_area,
            address,
        }
    }
}

#[async_trait]
impl Frontend for CliFrontend {
    async fn run(&mut self, handle: RuntimeHandle) -> Result<()> {
        tracing::info!("CLI frontend starting...");

        let mut view = ViewState::new(&self.config, self.play_area, self.address.as_deref());
        view.message_log_mut()
            .info("Clear the room, then walk through the door on the left.", None);

        let mut terminal = terminal::init()?;
        let _guard = terminal::TerminalGuard;

        let reports_release =
            self.cli_config.ui.key_release_events && terminal::enable_key_release_events();
        if !reports_release {
            tracing::info!("Terminal does not report key releases, sending taps");
        }

        let event_loop = EventLoop {
            game_rx: handle.subscribe(Topic::Game),
            ledger_rx: handle.subscribe(Topic::Ledger),
            handle,
            input: InputHandler::new(reports_release),
            view,
            ui_config: self.cli_config.ui.clone(),
            frame_interval: self.config.frame_interval,
            dirty: false,
        };

        let view = event_loop.run(&mut terminal).await?;

        tracing::info!(
            messages = view.message_log().len(),
            "CLI frontend exiting"
        );
        Ok(())
    }
}
