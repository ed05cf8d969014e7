//! Event loop orchestrating runtime events, user input, and rendering.
//!
//! Runtime events are folded into the [`ViewState`] as they arrive. Input is
//! polled and the screen redrawn once per frame interval, so bursts of
//! events cost a single draw.

use anyhow::Result;
use client_frontend_core::{EventConsumer, ViewState};
use crossterm::event::{self, Event as TermEvent, KeyEvent};
use runtime::{Event as RuntimeEvent, RuntimeError, RuntimeHandle};
use tokio::{
    sync::broadcast::{self, error::RecvError},
    time::{self, Duration},
};

use crate::config::UiConfig;
use crate::input::{InputHandler, KeyAction};
use crate::presentation::{terminal::Tui, ui};

pub struct EventLoop {
    pub(crate) handle: RuntimeHandle,
    pub(crate) game_rx: broadcast::Receiver<RuntimeEvent>,
    pub(crate) ledger_rx: broadcast::Receiver<RuntimeEvent>,
    pub(crate) input: InputHandler,
    pub(crate) view: ViewState,
    pub(crate) ui_config: UiConfig,
    pub(crate) frame_interval: Duration,
    pub(crate) dirty: bool,
}

impl EventLoop {
    pub async fn run(mut self, terminal: &mut Tui) -> Result<ViewState> {
        let snapshot = self.handle.snapshot().await?;
        self.view.set_snapshot(snapshot);
        self.render(terminal)?;

        loop {
            tokio::select! {
                result = self.game_rx.recv() => {
                    if self.handle_runtime_event(result) {
                        break;
                    }
                }
                result = self.ledger_rx.recv() => {
                    if self.handle_runtime_event(result) {
                        break;
                    }
                }
                _ = time::sleep(self.frame_interval) => {
                    if self.handle_input_tick().await? {
                        break;
                    }
                    if self.dirty {
                        self.render(terminal)?;
                    }
                }
            }
        }

        Ok(self.view)
    }

    /// Returns true when the runtime has gone away.
    fn handle_runtime_event(&mut self, result: Result<RuntimeEvent, RecvError>) -> bool {
        match result {
            Ok(event) => {
                self.dirty |= self.view.on_event(&event).requires_redraw;
                false
            }
            Err(RecvError::Closed) => {
                tracing::warn!("Event stream closed");
                true
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Dropped {} stale events", skipped);
                false
            }
        }
    }

    /// Drains pending terminal events. Returns true when the user quits.
    async fn handle_input_tick(&mut self) -> Result<bool> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                TermEvent::Key(key) => {
                    if self.handle_key(key).await? {
                        return Ok(true);
                    }
                }
                TermEvent::Resize(_, _) => self.dirty = true,
                _ => {}
            }
        }
        Ok(false)
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match self.input.handle_key(key, self.view.is_game_over()) {
            KeyAction::Quit => {
                self.view.message_log_mut().info("Quitting...", None);
                return Ok(true);
            }
            KeyAction::Restart => match self.handle.restart().await {
                Ok(()) => {}
                Err(RuntimeError::Session(err)) => {
                    tracing::debug!("Restart refused: {err}");
                }
                Err(err) => return Err(err.into()),
            },
            KeyAction::Press(key) => self.handle.key_down(key).await?,
            KeyAction::Release(key) => self.handle.key_up(key).await?,
            KeyAction::Tap(key) => self.handle.tap(key).await?,
            KeyAction::None => {}
        }
        Ok(false)
    }

    fn render(&mut self, terminal: &mut Tui) -> Result<()> {
        self.dirty = false;
        let frame = self.view.frame();
        ui::render(terminal, frame.as_ref(), &self.ui_config)
    }
}
