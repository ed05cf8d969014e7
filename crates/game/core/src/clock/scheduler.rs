//! Tagged one-shot timers with deterministic firing order.

use std::collections::BTreeMap;

use strum::Display;

use super::Millis;
use crate::state::EnemyId;

/// Opaque handle returned by [`Scheduler::schedule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Work item carried by a pending timer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Timer {
    /// Clears the player's attacking flag.
    AttackCooldown,
    /// Resolves enemies struck by one attack from hit to dead.
    EnemyDeath { enemies: Vec<EnemyId> },
    /// Clears the damage-flash signal.
    DamageFlash,
    /// Periodic enemy pursuit and contact pass.
    EnemyTick,
    /// Periodic Idle/Walk toggle while the player is moving.
    AnimationFrame,
}

/// Cancellation key for a family of timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TimerTag {
    AttackCooldown,
    EnemyDeath,
    DamageFlash,
    EnemyTick,
    AnimationFrame,
}

impl Timer {
    pub fn tag(&self) -> TimerTag {
        match self {
            Timer::AttackCooldown => TimerTag::AttackCooldown,
            Timer::EnemyDeath { .. } => TimerTag::EnemyDeath,
            Timer::DamageFlash => TimerTag::DamageFlash,
            Timer::EnemyTick => TimerTag::EnemyTick,
            Timer::AnimationFrame => TimerTag::AnimationFrame,
        }
    }
}

impl TimerTag {
    /// Timers that mutate the current room's player or enemy state.
    ///
    /// These are dropped on room entry, restart, and game over.
    pub const fn is_room_scoped(self) -> bool {
        matches!(
            self,
            TimerTag::AttackCooldown | TimerTag::EnemyDeath | TimerTag::EnemyTick
        )
    }
}

/// Virtual-time scheduler.
///
/// Timers fire in deadline order; timers sharing a deadline fire in the order
/// they were scheduled. A handler that schedules a new timer does so relative
/// to the deadline that is currently firing, which keeps periodic timers on a
/// fixed cadence even when the driver advances time in large steps.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Millis,
    next_id: u64,
    pending: BTreeMap<(Millis, TimerId), Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Schedules `timer` to fire `delay` after the current time.
    pub fn schedule(&mut self, delay: Millis, timer: Timer) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert((self.now + delay, id), timer);
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let key = self.pending.keys().find(|(_, pending)| *pending == id).copied();
        key.and_then(|key| self.pending.remove(&key)).is_some()
    }

    /// Drops every pending timer carrying `tag`, returning how many were dropped.
    pub fn cancel_all(&mut self, tag: TimerTag) -> usize {
        self.cancel_where(|timer| timer.tag() == tag)
    }

    /// Drops every timer bound to the current room.
    pub fn cancel_room_scoped(&mut self) -> usize {
        self.cancel_where(|timer| timer.tag().is_room_scoped())
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, tag: TimerTag) -> bool {
        self.pending.values().any(|timer| timer.tag() == tag)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Removes and returns the earliest timer due at or before `until`.
    ///
    /// The scheduler's clock moves to the timer's deadline. Time never moves
    /// backwards.
    pub fn pop_due(&mut self, until: Millis) -> Option<Timer> {
        let key = *self.pending.keys().next()?;
        if key.0 > until {
            return None;
        }
        let timer = self.pending.remove(&key)?;
        self.now = self.now.max(key.0);
        Some(timer)
    }

    /// Moves the clock forward to `now` without firing anything.
    pub fn set_now(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    fn cancel_where(&mut self, predicate: impl Fn(&Timer) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, timer| !predicate(timer));
        before - self.pending.len()
    }
}
