//! End-to-end runtime scenarios against the in-memory ledger.
//!
//! Every test runs on a paused tokio clock, so session timers fire exactly at
//! their deadlines and ledger latency costs no wall time.

use std::sync::Arc;
use std::time::Duration;

use client_blockchain_core::{InMemoryLedger, PlayerAccount};
use game_core::{GameEvent, Key, RoomPhase, ScriptedRng, SessionError, ViviState};
use runtime::{Event, LedgerEvent, Runtime, RuntimeConfig, RuntimeError, SessionContext, Topic};
use tokio::sync::broadcast;
use tokio::time;

const OWNER: &str = "0x00aa";
const CONTRACT: &str = "0x00bb";

fn vivi(health_points: u32, room: u32) -> ViviState {
    ViviState {
        health_points,
        room,
        owner: OWNER.into(),
        contract_address: CONTRACT.into(),
    }
}

/// Spawn script for room 0: one enemy at `(x, y)`, reachable from the
/// player's start at (576, 296).
fn one_enemy_at(x: f32, y: f32) -> ScriptedRng {
    ScriptedRng::from_units(&[x / 1152.0, y / 592.0])
}

fn context(account: PlayerAccount, seed: ViviState) -> SessionContext {
    SessionContext::new("test-session")
        .with_account(account)
        .with_vivi(seed)
}

async fn start(ledger: &InMemoryLedger, context: SessionContext, rng: ScriptedRng) -> Runtime {
    Runtime::builder()
        .session(context)
        .ledger(Arc::new(ledger.clone()))
        .rng(rng)
        .build()
        .await
        .expect("runtime should build")
}

async fn start_with_account(ledger: &InMemoryLedger, seed: ViviState) -> Runtime {
    let account = ledger.insert_account("player@example.com", "secret", seed.clone());
    start(ledger, context(account, seed), one_enemy_at(640.0, 300.0)).await
}

/// Kills the single enemy in front of the player and waits for the door.
async fn clear_room(runtime: &Runtime) {
    let handle = runtime.handle();
    handle.tap(Key::Attack).await.expect("attack");
    time::sleep(Duration::from_millis(250)).await;

    let snapshot = handle.snapshot().await.expect("snapshot");
    assert!(snapshot.door_open, "enemy should be dead: {snapshot:?}");
    assert_eq!(snapshot.phase, RoomPhase::Cleared);
}

async fn walk_to_door(runtime: &Runtime) {
    let handle = runtime.handle();
    for _ in 0..34 {
        handle.tap(Key::Left).await.expect("move");
    }
}

async fn next_verdict(rx: &mut broadcast::Receiver<Event>) -> LedgerEvent {
    time::timeout(Duration::from_secs(10), async {
        loop {
            match rx.recv().await {
                Ok(Event::Ledger(event @ LedgerEvent::AdvanceConfirmed { .. }))
                | Ok(Event::Ledger(event @ LedgerEvent::AdvanceFailed { .. })) => {
                    return event;
                }
                Ok(_) => continue,
                Err(err) => panic!("ledger topic closed: {err}"),
            }
        }
    })
    .await
    .expect("ledger verdict should arrive")
}

async fn next_game_event(
    rx: &mut broadcast::Receiver<Event>,
    wanted: impl Fn(&GameEvent) -> bool,
) -> GameEvent {
    time::timeout(Duration::from_secs(10), async {
        loop {
            match rx.recv().await {
                Ok(Event::Game(event)) if wanted(&event) => return event,
                Ok(_) => continue,
                Err(err) => panic!("game topic closed: {err}"),
            }
        }
    })
    .await
    .expect("game event should arrive")
}

#[tokio::test(start_paused = true)]
async fn cleared_room_advances_through_ledger() {
    let ledger = InMemoryLedger::new();
    let runtime = start_with_account(&ledger, vivi(10, 0)).await;
    let handle = runtime.handle();
    let mut ledger_rx = handle.subscribe(Topic::Ledger);

    clear_room(&runtime).await;
    walk_to_door(&runtime).await;

    let submitted = time::timeout(Duration::from_secs(10), ledger_rx.recv())
        .await
        .expect("submission should be announced")
        .expect("ledger topic open");
    assert!(matches!(
        submitted,
        Event::Ledger(LedgerEvent::AdvanceSubmitted { damage: 0, .. })
    ));

    match next_verdict(&mut ledger_rx).await {
        LedgerEvent::AdvanceConfirmed {
            ticket,
            transaction,
            reconciled,
        } => {
            assert_eq!(ticket.room, 0);
            assert!(transaction.is_some());
            assert!(!reconciled);
        }
        other => panic!("expected confirmation, got {other:?}"),
    }

    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.room, 1);
    assert_eq!(snapshot.phase, RoomPhase::Active);
    assert_eq!(snapshot.vivi.as_ref().map(|v| (v.health_points, v.room)), Some((10, 1)));
    assert_eq!(ledger.state_of(CONTRACT).map(|v| v.room), Some(1));
    assert_eq!(ledger.write_count(), 1);
    assert_eq!(handle.ledger_metrics().confirmed(), 1);
}

#[tokio::test(start_paused = true)]
async fn rejected_advance_returns_to_cleared_and_retries_on_reentry() {
    let ledger = InMemoryLedger::new();
    ledger.fail_next_writes(1);
    let runtime = start_with_account(&ledger, vivi(10, 0)).await;
    let handle = runtime.handle();
    let mut ledger_rx = handle.subscribe(Topic::Ledger);

    clear_room(&runtime).await;
    walk_to_door(&runtime).await;

    match next_verdict(&mut ledger_rx).await {
        LedgerEvent::AdvanceFailed { reason, .. } => {
            assert!(reason.contains("injected write failure"), "{reason}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.phase, RoomPhase::Cleared);
    assert_eq!(snapshot.room, 0);

    // Standing still in the zone does not retry; stepping out and back does.
    handle.tap(Key::Right).await.expect("step out");
    handle.tap(Key::Left).await.expect("step in");

    assert!(matches!(
        next_verdict(&mut ledger_rx).await,
        LedgerEvent::AdvanceConfirmed { .. }
    ));
    assert_eq!(handle.snapshot().await.expect("snapshot").room, 1);
    assert_eq!(ledger.write_count(), 2);

    let metrics = handle.ledger_metrics();
    assert_eq!(metrics.failed(), 1);
    assert_eq!(metrics.confirmed(), 1);
}

#[tokio::test(start_paused = true)]
async fn ambiguous_failure_is_reconciled_by_reading_back() {
    let ledger = InMemoryLedger::new();
    ledger.fail_writes_after_apply(1);
    let runtime = start_with_account(&ledger, vivi(10, 0)).await;
    let handle = runtime.handle();
    let mut ledger_rx = handle.subscribe(Topic::Ledger);

    clear_room(&runtime).await;
    walk_to_door(&runtime).await;

    match next_verdict(&mut ledger_rx).await {
        LedgerEvent::AdvanceConfirmed {
            transaction,
            reconciled,
            ..
        } => {
            assert!(transaction.is_none());
            assert!(reconciled);
        }
        other => panic!("expected reconciled confirmation, got {other:?}"),
    }

    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.room, 1);
    assert_eq!(ledger.state_of(CONTRACT).map(|v| v.room), Some(1));
    assert_eq!(ledger.write_count(), 1);
    assert_eq!(handle.ledger_metrics().reconciled(), 1);
}

#[tokio::test(start_paused = true)]
async fn session_without_wallet_never_advances() {
    let ledger = InMemoryLedger::new();
    let runtime = start(
        &ledger,
        SessionContext::new("offline"),
        one_enemy_at(640.0, 300.0),
    )
    .await;
    let handle = runtime.handle();
    let mut ledger_rx = handle.subscribe(Topic::Ledger);

    clear_room(&runtime).await;
    walk_to_door(&runtime).await;

    match next_verdict(&mut ledger_rx).await {
        LedgerEvent::AdvanceFailed { reason, .. } => assert!(reason.contains("no wallet")),
        other => panic!("expected failure, got {other:?}"),
    }
    let snapshot = handle.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.phase, RoomPhase::Cleared);
    assert_eq!(snapshot.vivi, None);
    assert_eq!(ledger.write_count(), 0);
    assert_eq!(handle.ledger_metrics().submitted(), 0);
}

#[tokio::test(start_paused = true)]
async fn input_is_ignored_while_transitioning() {
    let ledger = InMemoryLedger::new().with_latency(Duration::from_millis(500));
    let runtime = start_with_account(&ledger, vivi(10, 0)).await;
    let handle = runtime.handle();
    let mut ledger_rx = handle.subscribe(Topic::Ledger);

    clear_room(&runtime).await;
    walk_to_door(&runtime).await;

    let before = handle.snapshot().await.expect("snapshot");
    assert!(before.transitioning);
    handle.tap(Key::Right).await.expect("move");
    handle.tap(Key::Attack).await.expect("attack");
    let after = handle.snapshot().await.expect("snapshot");
    assert_eq!(after.player.position, before.player.position);
    assert!(!after.player.attacking);

    assert!(matches!(
        next_verdict(&mut ledger_rx).await,
        LedgerEvent::AdvanceConfirmed { .. }
    ));
    assert_eq!(handle.snapshot().await.expect("snapshot").room, 1);
}

#[tokio::test(start_paused = true)]
async fn contact_at_one_health_ends_the_game_and_restart_resets() {
    let ledger = InMemoryLedger::new();
    let seed = vivi(1, 0);
    let account = ledger.insert_account("player@example.com", "secret", seed.clone());
    let runtime = start(&ledger, context(account, seed), one_enemy_at(580.0, 300.0)).await;
    let handle = runtime.handle();
    let mut game_rx = handle.subscribe(Topic::Game);

    let event = next_game_event(&mut game_rx, |event| {
        matches!(event, GameEvent::GameOver { .. })
    })
    .await;
    assert_eq!(event, GameEvent::GameOver { room: 0 });

    let snapshot = handle.snapshot().await.expect("snapshot");
    assert!(snapshot.game_over);
    assert_eq!(snapshot.health, 0);

    handle.tap(Key::Left).await.expect("move");
    let frozen = handle.snapshot().await.expect("snapshot");
    assert_eq!(frozen.player.position, snapshot.player.position);

    handle.restart().await.expect("restart after game over");
    let restarted = handle.snapshot().await.expect("snapshot");
    assert_eq!(restarted.room, 0);
    assert_eq!(restarted.health, restarted.max_health);
    assert_eq!(restarted.phase, RoomPhase::Active);
    assert_eq!(restarted.vivi, Some(vivi(1, 0)));
}

#[tokio::test(start_paused = true)]
async fn restart_is_refused_while_playing() {
    let ledger = InMemoryLedger::new();
    let runtime = start_with_account(&ledger, vivi(10, 0)).await;

    let err = runtime
        .handle()
        .restart()
        .await
        .expect_err("restart should be refused");
    assert!(matches!(
        err,
        RuntimeError::Session(SessionError::NotGameOver {
            phase: RoomPhase::Active
        })
    ));
    assert!(!err.severity().is_internal());
}

#[tokio::test(start_paused = true)]
async fn movement_publishes_event_then_snapshot() {
    let ledger = InMemoryLedger::new();
    let runtime = start_with_account(&ledger, vivi(10, 0)).await;
    let handle = runtime.handle();
    let mut game_rx = handle.subscribe(Topic::Game);

    handle.tap(Key::Left).await.expect("move");

    let moved = next_game_event(&mut game_rx, |event| {
        matches!(event, GameEvent::PlayerMoved { .. })
    })
    .await;
    let GameEvent::PlayerMoved { position, .. } = moved else {
        unreachable!()
    };
    assert_eq!(position.x, 560.0);

    let snapshot = time::timeout(Duration::from_secs(1), async {
        loop {
            if let Ok(Event::Snapshot(snapshot)) = game_rx.recv().await {
                return snapshot;
            }
        }
    })
    .await
    .expect("snapshot should follow the move");
    assert_eq!(snapshot.player.position.x, 560.0);
}

#[tokio::test(start_paused = true)]
async fn seeded_room_and_health_come_from_ledger_state() {
    let ledger = InMemoryLedger::new();
    let seed = vivi(7, 3);
    let account = ledger.insert_account("player@example.com", "secret", seed.clone());
    let runtime = Runtime::builder()
        .session(context(account, seed))
        .ledger(Arc::new(ledger.clone()))
        .seed(42)
        .build()
        .await
        .expect("runtime should build");

    let snapshot = runtime.handle().snapshot().await.expect("snapshot");
    assert_eq!(snapshot.room, 3);
    assert_eq!(snapshot.health, 7);
    assert!((1..=3).contains(&snapshot.living_enemies()));
}

#[tokio::test]
async fn build_requires_a_ledger() {
    let result = Runtime::builder()
        .config(RuntimeConfig::default())
        .build()
        .await;
    assert!(matches!(result, Err(RuntimeError::MissingLedger)));
}

#[tokio::test(start_paused = true)]
async fn shutdown_joins_workers() {
    let ledger = InMemoryLedger::new();
    let runtime = start_with_account(&ledger, vivi(10, 0)).await;
    let handle = runtime.handle();
    handle.tap(Key::Up).await.expect("move");
    drop(handle);

    runtime.shutdown().await.expect("clean shutdown");
}
