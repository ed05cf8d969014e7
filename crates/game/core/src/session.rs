//! Game session: the single writer of all simulation state.
//!
//! Every command takes the driver's current time. Before the command itself
//! runs, every timer due at or before that time fires in deadline order, so a
//! command always observes the world as it was at `now`.

use tracing::{debug, info};

use crate::clock::{Millis, Scheduler, Timer, TimerTag};
use crate::combat;
use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::error::SessionError;
use crate::event::{AdvanceOutcome, AdvanceRequest, AdvanceTicket, GameEvent};
use crate::input::{InputController, Key, KeyPress};
use crate::room::{self, RoomPhase, RoomState};
use crate::snapshot::Snapshot;
use crate::state::{AnimationFrame, EnemyId, EntitiesState, Facing, Player, ViviState};

pub struct GameSession {
    config: GameConfig,
    entities: EntitiesState,
    room: RoomState,
    scheduler: Scheduler,
    input: InputController,
    rng: Box<dyn RngOracle>,
    vivi: Option<ViviState>,
    damage_flash: bool,
    next_ticket: u64,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Creates a session and enters its first room.
    ///
    /// With a ledger seed the session starts in `seed.room` with
    /// `min(seed.health_points, max_health)` health; without one it starts in
    /// room 0 at full health. A seed with zero health starts in `GameOver`.
    /// Events produced while entering the first room are available through
    /// [`GameSession::take_events`].
    pub fn new(config: GameConfig, seed: Option<ViviState>, rng: impl RngOracle + 'static) -> Self {
        let (room, health) = match &seed {
            Some(vivi) => (vivi.room, vivi.health_points.min(config.max_health)),
            None => (0, config.max_health),
        };
        let center = config.play_area.center_for(GameConfig::PLAYER_SIZE);

        let mut session = Self {
            entities: EntitiesState::new(Player::new(center, health)),
            room: RoomState::enter(room),
            scheduler: Scheduler::new(),
            input: InputController::new(),
            rng: Box::new(rng),
            vivi: seed,
            damage_flash: false,
            next_ticket: 0,
            events: Vec::new(),
            config,
        };

        session.enter_room(room);
        if !session.entities.player.is_alive() {
            session.enter_game_over();
        }
        session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn entities(&self) -> &EntitiesState {
        &self.entities
    }

    pub fn room(&self) -> &RoomState {
        &self.room
    }

    pub fn phase(&self) -> RoomPhase {
        self.room.phase
    }

    pub fn vivi(&self) -> Option<&ViviState> {
        self.vivi.as_ref()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    /// Earliest pending timer deadline; the driver should call
    /// [`GameSession::advance_to`] no later than this.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.scheduler.next_deadline()
    }

    /// Drains events produced outside a command (at construction).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fires every timer due at or before `now`.
    pub fn advance_to(&mut self, now: Millis) -> Vec<GameEvent> {
        self.fire_due(now);
        self.take_events()
    }

    pub fn key_down(&mut self, key: Key, now: Millis) -> Vec<GameEvent> {
        self.fire_due(now);

        let press = self.input.press(key, self.config.move_step);
        if self.room.phase.is_playable() {
            match press {
                KeyPress::Move { dx, dy, facing } => self.move_player(dx, dy, facing),
                KeyPress::Attack => self.attack(),
                KeyPress::Ignored => {}
            }
        }

        self.take_events()
    }

    pub fn key_up(&mut self, key: Key, now: Millis) -> Vec<GameEvent> {
        self.fire_due(now);

        let still_moving = self.input.release(key);
        if key.is_movement() && !still_moving {
            self.stop_moving();
        }

        self.take_events()
    }

    /// Starts over from room 0 at full health. Only accepted in `GameOver`.
    ///
    /// The mirrored ledger state is left as is: the ledger has no notion of
    /// a restart.
    pub fn restart(&mut self, now: Millis) -> Result<Vec<GameEvent>, SessionError> {
        if !self.room.is_game_over() {
            return Err(SessionError::NotGameOver {
                phase: self.room.phase,
            });
        }
        self.fire_due(now);

        self.scheduler.clear();
        self.input.clear();
        self.damage_flash = false;
        let center = self
            .config
            .play_area
            .center_for(GameConfig::PLAYER_SIZE);
        self.entities.player = Player::new(center, self.config.max_health);

        info!(target: "game_core::session", "restarting from room 0");
        self.events.push(GameEvent::Restarted);
        self.enter_room(0);

        Ok(self.take_events())
    }

    /// Resolves the outstanding room advance with the ledger's verdict.
    ///
    /// On success the mirrored ledger state is reconciled and the next room is
    /// entered. On failure nothing advances: the session returns to `Cleared`
    /// and the player has to leave and re-enter the door zone to retry.
    pub fn complete_room_advance(
        &mut self,
        ticket: AdvanceTicket,
        outcome: AdvanceOutcome,
        now: Millis,
    ) -> Result<Vec<GameEvent>, SessionError> {
        let outstanding = self.room.pending.ok_or(SessionError::NoPendingAdvance)?;
        if outstanding != ticket {
            return Err(SessionError::StaleTicket {
                outstanding,
                got: ticket,
            });
        }
        self.fire_due(now);
        self.room.pending = None;

        match outcome {
            Ok(()) => {
                let damage = self.room.damage;
                if let Some(vivi) = self.vivi.as_mut() {
                    vivi.apply_advance(damage);
                }
                info!(
                    target: "game_core::session",
                    room = ticket.room,
                    damage,
                    "room advance confirmed"
                );
                self.enter_room(ticket.room + 1);
            }
            Err(reason) => {
                info!(
                    target: "game_core::session",
                    room = ticket.room,
                    %reason,
                    "room advance failed, door stays open"
                );
                self.room.phase = RoomPhase::Cleared;
                self.events
                    .push(GameEvent::RoomAdvanceFailed { ticket, reason });
            }
        }

        Ok(self.take_events())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.entities.player.clone(),
            enemies: self.entities.enemies.clone(),
            room: self.room.index,
            door_open: self.entities.all_enemies_dead(),
            health: self.entities.player.health,
            max_health: self.config.max_health,
            damage: self.room.damage,
            phase: self.room.phase,
            game_over: self.room.is_game_over(),
            transitioning: self.room.is_transitioning(),
            damage_flash: self.damage_flash,
            vivi: self.vivi.clone(),
            now: self.scheduler.now(),
        }
    }

    // ===== timers =====

    fn fire_due(&mut self, now: Millis) {
        while let Some(timer) = self.scheduler.pop_due(now) {
            self.on_timer(timer);
        }
        self.scheduler.set_now(now);
    }

    fn on_timer(&mut self, timer: Timer) {
        match timer {
            Timer::AttackCooldown => self.entities.player.attacking = false,
            Timer::EnemyDeath { enemies } => self.resolve_deaths(&enemies),
            Timer::DamageFlash => self.damage_flash = false,
            Timer::EnemyTick => self.enemy_tick(),
            Timer::AnimationFrame => {
                if self.entities.player.moving {
                    let player = &mut self.entities.player;
                    player.frame = player.frame.toggled();
                    self.scheduler
                        .schedule(self.config.animation_period, Timer::AnimationFrame);
                }
            }
        }
    }

    fn enemy_tick(&mut self) {
        if self.room.phase != RoomPhase::Active {
            return;
        }

        combat::pursue(&mut self.entities, self.config.enemy_speed);

        if let Some(enemy) = combat::first_contact(&self.entities, self.config.contact_radius) {
            self.apply_contact(enemy);
            if self.room.is_game_over() {
                return;
            }
        }

        if self.entities.has_living_enemies() {
            self.scheduler
                .schedule(self.config.enemy_tick, Timer::EnemyTick);
        }
    }

    fn apply_contact(&mut self, enemy: EnemyId) {
        let health = self.entities.player.take_damage(1);
        self.room.damage += 1;

        self.damage_flash = true;
        self.scheduler.cancel_all(TimerTag::DamageFlash);
        self.scheduler
            .schedule(self.config.damage_flash, Timer::DamageFlash);

        debug!(
            target: "game_core::session",
            %enemy,
            health,
            room_damage = self.room.damage,
            "contact damage"
        );
        self.events.push(GameEvent::DamageTaken {
            enemy,
            health,
            room_damage: self.room.damage,
        });

        if health == 0 {
            self.enter_game_over();
        }
    }

    fn resolve_deaths(&mut self, enemies: &[EnemyId]) {
        for &id in enemies {
            if let Some(enemy) = self.entities.enemy_mut(id) {
                enemy.alive = false;
                enemy.hit = false;
                self.events.push(GameEvent::EnemyKilled { enemy: id });
            }
        }

        if self.room.phase == RoomPhase::Active && self.entities.all_enemies_dead() {
            self.room.phase = RoomPhase::Cleared;
            self.events.push(GameEvent::DoorOpened {
                room: self.room.index,
            });
            self.check_door();
        }
    }

    // ===== input =====

    fn move_player(&mut self, dx: f32, dy: f32, facing: Option<Facing>) {
        let area = self.config.play_area;
        let player = &mut self.entities.player;
        player.position = area.clamp(player.position.offset(dx, dy), GameConfig::PLAYER_SIZE);
        if let Some(facing) = facing {
            player.facing = facing;
        }
        self.events.push(GameEvent::PlayerMoved {
            position: player.position,
            facing: player.facing,
        });

        if !player.moving {
            player.moving = true;
            if !self.scheduler.is_pending(TimerTag::AnimationFrame) {
                self.scheduler
                    .schedule(self.config.animation_period, Timer::AnimationFrame);
            }
        }

        self.check_door();
    }

    fn stop_moving(&mut self) {
        let player = &mut self.entities.player;
        if player.moving {
            player.moving = false;
            player.frame = AnimationFrame::Idle;
            self.scheduler.cancel_all(TimerTag::AnimationFrame);
        }
    }

    fn attack(&mut self) {
        if self.entities.player.attacking {
            return;
        }
        self.entities.player.attacking = true;
        self.scheduler
            .schedule(self.config.attack_duration, Timer::AttackCooldown);
        self.events.push(GameEvent::AttackStarted {
            facing: self.entities.player.facing,
        });

        let struck = combat::strike(&mut self.entities, self.config.attack_range);
        if !struck.is_empty() {
            self.scheduler.schedule(
                self.config.attack_duration,
                Timer::EnemyDeath {
                    enemies: struck.clone(),
                },
            );
            self.events.push(GameEvent::EnemyHit { enemies: struck });
        }
    }

    // ===== room transitions =====

    /// Evaluates the edge-armed door trigger at the player's position.
    fn check_door(&mut self) {
        let in_zone = self
            .config
            .play_area
            .door_contains(self.entities.player.position);
        if !in_zone {
            self.room.door_armed = true;
            return;
        }
        if self.room.phase == RoomPhase::Cleared && self.room.door_armed {
            self.room.door_armed = false;
            self.begin_transition();
        }
    }

    fn begin_transition(&mut self) {
        let ticket = AdvanceTicket {
            id: self.next_ticket,
            room: self.room.index,
        };
        self.next_ticket += 1;
        self.room.phase = RoomPhase::Transitioning;
        self.room.pending = Some(ticket);

        info!(
            target: "game_core::session",
            room = ticket.room,
            ticket = ticket.id,
            damage = self.room.damage,
            "requesting room advance"
        );
        self.events
            .push(GameEvent::RoomAdvanceRequested(AdvanceRequest {
                ticket,
                damage: self.room.damage,
                heal: 0,
            }));
    }

    fn enter_room(&mut self, index: u32) {
        self.scheduler.cancel_room_scoped();

        self.room = RoomState::enter(index);
        self.entities.enemies =
            room::spawn_enemies(index, &self.config.play_area, self.rng.as_mut());

        let player = &mut self.entities.player;
        player.position = self
            .config
            .play_area
            .center_for(GameConfig::PLAYER_SIZE);
        player.attacking = false;

        self.scheduler
            .schedule(self.config.enemy_tick, Timer::EnemyTick);

        debug!(
            target: "game_core::session",
            room = index,
            enemies = self.entities.enemies.len(),
            "entered room"
        );
        self.events.push(GameEvent::RoomEntered {
            room: index,
            enemies: self.entities.enemies.len(),
        });
    }

    fn enter_game_over(&mut self) {
        self.room.phase = RoomPhase::GameOver;
        self.room.pending = None;

        self.scheduler.cancel_room_scoped();
        self.scheduler.cancel_all(TimerTag::AnimationFrame);
        let player = &mut self.entities.player;
        player.moving = false;
        player.attacking = false;
        player.frame = AnimationFrame::Idle;

        info!(target: "game_core::session", room = self.room.index, "game over");
        self.events.push(GameEvent::GameOver {
            room: self.room.index,
        });
    }
}

impl core::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameSession")
            .field("room", &self.room)
            .field("health", &self.entities.player.health)
            .field("enemies", &self.entities.enemies.len())
            .field("pending_timers", &self.scheduler.len())
            .finish_non_exhaustive()
    }
}
