//! Frontend-agnostic view of a running session.
//!
//! [`ViewState`] folds runtime events into the latest [`Snapshot`], a message
//! log, and ledger progress. Frontends call [`ViewState::frame`] to get a
//! [`UiFrame`] with everything a single redraw needs.

use game_core::{Enemy, Facing, GameEvent, PlayArea, Position, RoomPhase, Snapshot};
use runtime::{Event, LedgerEvent};

use crate::config::FrontendConfig;
use crate::event::{EventConsumer, EventImpact};
use crate::format::{entering_label, room_label, short_address};
use crate::message::{MessageEntry, MessageLog};

/// Progress of the most recent room-advance ledger call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LedgerStatus {
    #[default]
    Idle,
    Submitting {
        room: u32,
    },
    Confirmed {
        transaction: Option<String>,
    },
    Failed {
        reason: String,
    },
}

/// Everything needed to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct UiFrame {
    pub play_area: PlayArea,
    pub address: Option<String>,
    pub room_label: String,
    pub health: u32,
    pub max_health: u32,
    pub health_ratio: f32,
    pub player: Position,
    pub facing: Facing,
    pub attacking: bool,
    pub enemies: Vec<Enemy>,
    pub door_open: bool,
    /// Centered overlay text, e.g. the loading label or game-over prompt.
    pub banner: Option<String>,
    pub damage_flash: bool,
    pub ledger: LedgerStatus,
    pub messages: Vec<MessageEntry>,
    pub show_help: bool,
}

pub struct ViewState {
    play_area: PlayArea,
    address: Option<String>,
    snapshot: Option<Snapshot>,
    messages: MessageLog,
    visible_messages: usize,
    help_visible: bool,
    ledger: LedgerStatus,
}

impl ViewState {
    pub fn new(config: &FrontendConfig, play_area: PlayArea, address: Option<&str>) -> Self {
        Self {
            play_area,
            address: address.map(short_address),
            snapshot: None,
            messages: MessageLog::new(config.messages.capacity),
            visible_messages: config.messages.visible,
            help_visible: config.show_controls_help,
            ledger: LedgerStatus::Idle,
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn ledger(&self) -> &LedgerStatus {
        &self.ledger
    }

    pub fn is_game_over(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|snapshot| snapshot.game_over)
    }

    /// Replaces the cached snapshot, e.g. after an explicit query.
    pub fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
    }

    /// Builds the frame to draw, or `None` before the first snapshot.
    pub fn frame(&self) -> Option<UiFrame> {
        let snapshot = self.snapshot.as_ref()?;

        let banner = match snapshot.phase {
            RoomPhase::GameOver => Some(format!(
                "GAME OVER in {} - press R to restart",
                room_label(snapshot.room)
            )),
            RoomPhase::Transitioning => Some(entering_label(snapshot.room)),
            RoomPhase::Active | RoomPhase::Cleared => None,
        };

        Some(UiFrame {
            play_area: self.play_area,
            address: self.address.clone(),
            room_label: room_label(snapshot.room),
            health: snapshot.health,
            max_health: snapshot.max_health,
            health_ratio: snapshot.health_ratio(),
            player: snapshot.player.position,
            facing: snapshot.player.facing,
            attacking: snapshot.player.attacking,
            enemies: snapshot.enemies.clone(),
            door_open: snapshot.door_open,
            banner,
            damage_flash: snapshot.damage_flash,
            ledger: self.ledger.clone(),
            messages: self
                .messages
                .recent(self.visible_messages)
                .cloned()
                .collect(),
            show_help: self.help_visible,
        })
    }

    fn on_game_event(&mut self, event: &GameEvent) -> EventImpact {
        let at = self.snapshot.as_ref().map(|snapshot| snapshot.now);
        match event {
            GameEvent::PlayerMoved { .. } => {
                self.help_visible = false;
                return EventImpact::none();
            }
            GameEvent::AttackStarted { .. } | GameEvent::EnemyHit { .. } => {
                return EventImpact::none();
            }
            GameEvent::EnemyKilled { .. } => self.messages.info("Enemy defeated", at),
            GameEvent::DamageTaken { health, .. } => {
                self.messages.warn(format!("Hit! {health} HP left"), at)
            }
            GameEvent::DoorOpened { .. } => {
                self.messages.info("Room cleared, the door is open", at)
            }
            GameEvent::RoomAdvanceRequested(request) => {
                self.ledger = LedgerStatus::Submitting {
                    room: request.ticket.room,
                };
            }
            GameEvent::RoomAdvanceFailed { reason, .. } => {
                self.messages
                    .error(format!("Could not leave the room: {reason}"), at)
            }
            GameEvent::RoomEntered { room, enemies } => self.messages.info(
                format!("Entered {} ({enemies} enemies)", room_label(*room)),
                at,
            ),
            GameEvent::GameOver { room } => self
                .messages
                .error(format!("Vivi fell in {}", room_label(*room)), at),
            GameEvent::Restarted => {
                self.ledger = LedgerStatus::Idle;
                self.messages.info("Starting over", at);
            }
        }
        EventImpact::redraw()
    }

    fn on_ledger_event(&mut self, event: &LedgerEvent) -> EventImpact {
        match event {
            LedgerEvent::AdvanceSubmitted { ticket, .. } => {
                self.ledger = LedgerStatus::Submitting { room: ticket.room };
            }
            LedgerEvent::AdvanceConfirmed { transaction, .. } => {
                self.ledger = LedgerStatus::Confirmed {
                    transaction: transaction.as_ref().map(|tx| short_address(tx.as_str())),
                };
            }
            LedgerEvent::AdvanceFailed { reason, .. } => {
                self.ledger = LedgerStatus::Failed {
                    reason: reason.clone(),
                };
            }
        }
        EventImpact::redraw()
    }
}

impl EventConsumer for ViewState {
    fn on_event(&mut self, event: &Event) -> EventImpact {
        match event {
            Event::Snapshot(snapshot) => {
                self.snapshot = Some((**snapshot).clone());
                EventImpact::redraw()
            }
            Event::Game(event) => self.on_game_event(event),
            Event::Ledger(event) => self.on_ledger_event(event),
        }
    }

    fn message_log(&self) -> &MessageLog {
        &self.messages
    }

    fn message_log_mut(&mut self) -> &mut MessageLog {
        &mut self.messages
    }

    fn take_message_log(self) -> MessageLog {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{AdvanceRequest, AdvanceTicket, EnemyId, Millis, Player};

    fn snapshot(phase: RoomPhase) -> Snapshot {
        Snapshot {
            player: Player::new(Position::new(576.0, 296.0), 8),
            enemies: Vec::new(),
            room: 2,
            door_open: phase == RoomPhase::Cleared,
            health: 8,
            max_health: 10,
            damage: 2,
            phase,
            game_over: phase == RoomPhase::GameOver,
            transitioning: phase == RoomPhase::Transitioning,
            damage_flash: false,
            vivi: None,
            now: Millis(1_000),
        }
    }

    fn view() -> ViewState {
        ViewState::new(
            &FrontendConfig::default(),
            PlayArea::default(),
            Some("0x1234567890abcdef1234567890abcdef"),
        )
    }

    #[test]
    fn no_frame_before_first_snapshot() {
        assert!(view().frame().is_none());
    }

    #[test]
    fn frame_reflects_snapshot() {
        let mut view = view();
        let impact = view.on_event(&Event::Snapshot(Box::new(snapshot(RoomPhase::Active))));
        assert!(impact.requires_redraw);

        let frame = view.frame().expect("frame");
        assert_eq!(frame.room_label, "Room 3");
        assert_eq!(frame.address.as_deref(), Some("0x1234...cdef"));
        assert_eq!(frame.health, 8);
        assert!((frame.health_ratio - 0.8).abs() < f32::EPSILON);
        assert_eq!(frame.banner, None);
        assert!(frame.show_help);
    }

    #[test]
    fn banners_follow_phase() {
        let mut view = view();
        view.set_snapshot(snapshot(RoomPhase::Transitioning));
        assert_eq!(
            view.frame().and_then(|frame| frame.banner).as_deref(),
            Some("Entering Room 4")
        );

        view.set_snapshot(snapshot(RoomPhase::GameOver));
        let banner = view.frame().and_then(|frame| frame.banner).expect("banner");
        assert!(banner.starts_with("GAME OVER"));
        assert!(view.is_game_over());
    }

    #[test]
    fn first_move_hides_help() {
        let mut view = view();
        view.set_snapshot(snapshot(RoomPhase::Active));
        let impact = view.on_event(&Event::Game(GameEvent::PlayerMoved {
            position: Position::new(560.0, 296.0),
            facing: Facing::Left,
        }));

        assert!(!impact.requires_redraw);
        assert!(!view.frame().expect("frame").show_help);
    }

    #[test]
    fn ledger_progress_is_tracked() {
        let mut view = view();
        let ticket = AdvanceTicket { id: 1, room: 2 };

        view.on_event(&Event::Game(GameEvent::RoomAdvanceRequested(AdvanceRequest {
            ticket,
            damage: 2,
            heal: 0,
        })));
        assert_eq!(view.ledger(), &LedgerStatus::Submitting { room: 2 });

        view.on_event(&Event::Ledger(LedgerEvent::AdvanceFailed {
            ticket,
            reason: "rejected".into(),
        }));
        assert_eq!(
            view.ledger(),
            &LedgerStatus::Failed {
                reason: "rejected".into()
            }
        );

        view.on_event(&Event::Game(GameEvent::Restarted));
        assert_eq!(view.ledger(), &LedgerStatus::Idle);
    }

    #[test]
    fn combat_events_are_logged() {
        let mut view = view();
        view.on_event(&Event::Game(GameEvent::EnemyKilled { enemy: EnemyId(0) }));
        view.on_event(&Event::Game(GameEvent::DamageTaken {
            enemy: EnemyId(1),
            health: 3,
            room_damage: 1,
        }));

        let texts: Vec<_> = view
            .message_log()
            .recent(10)
            .map(|entry| entry.text.clone())
            .collect();
        assert_eq!(texts, ["Hit! 3 HP left", "Enemy defeated"]);
    }
}
