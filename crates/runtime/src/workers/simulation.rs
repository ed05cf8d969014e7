//! Simulation worker that owns the authoritative [`GameSession`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives the session clock
//! from the tokio timer, hands room-advance requests to the ledger worker,
//! and publishes events to the EventBus.

use std::future;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant};
use tracing::{debug, info, trace, warn};

use client_blockchain_core::PlayerAccount;
use game_core::{AdvanceRequest, GameEvent, GameSession, Key, Millis, Snapshot};

use super::{AdvanceCompletion, AdvanceJob};
use crate::api::Result;
use crate::events::{Event, EventBus, Topic};

/// Commands that can be sent to the simulation worker
pub enum Command {
    KeyDown {
        key: Key,
    },
    KeyUp {
        key: Key,
    },
    /// Start over from room 0. Only valid after game over.
    Restart {
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the current session view (read-only).
    QuerySnapshot {
        reply: oneshot::Sender<Snapshot>,
    },
}

/// Background task that processes gameplay commands and timers.
pub struct SimulationWorker {
    session: GameSession,
    account: Option<PlayerAccount>,
    /// Wall-clock instant that maps to session time zero.
    origin: Instant,
    command_rx: mpsc::Receiver<Command>,
    job_tx: mpsc::Sender<AdvanceJob>,
    completion_rx: mpsc::Receiver<AdvanceCompletion>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        session: GameSession,
        account: Option<PlayerAccount>,
        command_rx: mpsc::Receiver<Command>,
        job_tx: mpsc::Sender<AdvanceJob>,
        completion_rx: mpsc::Receiver<AdvanceCompletion>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "runtime::worker",
            room = session.room().index,
            health = session.entities().player.health,
            enemies = session.entities().enemies.len(),
            wallet = account.is_some(),
            "simulation worker initialized"
        );

        Self {
            session,
            account,
            origin: Instant::now(),
            command_rx,
            job_tx,
            completion_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let events = self.session.take_events();
        self.dispatch(events).await;

        loop {
            let deadline = self
                .session
                .next_deadline()
                .map(|at| self.origin + at.as_duration());

            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd).await,
                    None => break,
                },
                Some(completion) = self.completion_rx.recv() => {
                    self.handle_completion(completion).await;
                }
                _ = wait_until(deadline) => {
                    let events = self.session.advance_to(self.now());
                    self.dispatch(events).await;
                }
            }
        }

        debug!(target: "runtime::worker", "simulation worker stopped");
    }

    fn now(&self) -> Millis {
        Millis::from(self.origin.elapsed())
    }

    async fn handle_command(&mut self, cmd: Command) {
        let now = self.now();
        match cmd {
            Command::KeyDown { key } => {
                let events = self.session.key_down(key, now);
                self.dispatch(events).await;
            }
            Command::KeyUp { key } => {
                let events = self.session.key_up(key, now);
                self.dispatch(events).await;
            }
            Command::Restart { reply } => {
                let result = match self.session.restart(now) {
                    Ok(events) => {
                        self.dispatch(events).await;
                        Ok(())
                    }
                    Err(err) => {
                        debug!(target: "runtime::worker", %err, "restart refused");
                        Err(err.into())
                    }
                };
                if reply.send(result).is_err() {
                    debug!("Restart reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                let events = self.session.advance_to(now);
                if !events.is_empty() {
                    self.dispatch(events).await;
                }
                if reply.send(self.session.snapshot()).is_err() {
                    debug!("QuerySnapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    async fn handle_completion(&mut self, completion: AdvanceCompletion) {
        let outcome = completion.result.as_ref().map(|_| ()).map_err(String::clone);
        match self
            .session
            .complete_room_advance(completion.ticket, outcome, self.now())
        {
            Ok(events) => {
                self.dispatch(events).await;
                self.event_bus
                    .publish(Event::Ledger(completion.to_event()));
            }
            Err(err) => warn!(
                target: "runtime::worker",
                %err,
                ticket = completion.ticket.id,
                "discarding ledger verdict"
            ),
        }
    }

    /// Publishes a batch of session events followed by a fresh snapshot.
    async fn dispatch(&mut self, events: Vec<GameEvent>) {
        for event in events {
            trace!(target: "runtime::worker", ?event, "game event");
            if let GameEvent::RoomAdvanceRequested(request) = &event {
                self.submit_advance(*request).await;
            }
            self.event_bus.publish(Event::Game(event));
        }

        if self.event_bus.subscriber_count(Topic::Game) > 0 {
            self.event_bus
                .publish(Event::Snapshot(Box::new(self.session.snapshot())));
        }
    }

    async fn submit_advance(&mut self, request: AdvanceRequest) {
        let job = AdvanceJob {
            request,
            account: self.account.clone(),
            baseline_room: self.session.vivi().map(|vivi| vivi.room),
        };
        if self.job_tx.send(job).await.is_err() {
            warn!(target: "runtime::worker", "ledger worker gone, failing advance");
            let reason = "ledger worker stopped".to_string();
            if let Ok(events) =
                self.session
                    .complete_room_advance(request.ticket, Err(reason), self.now())
            {
                for event in events {
                    self.event_bus.publish(Event::Game(event));
                }
            }
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}
