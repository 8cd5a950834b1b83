//! Paced action-queue scenarios.
//!
//! Every test runs with a paused tokio clock so slot timing, the swing
//! lifetime and the win delay can be asserted exactly without real sleeps.

use std::time::Duration;

use game_content::LevelLoader;
use game_core::{
    ActionToken, Feedback, GameConfig, ItemKind, LevelOutcome, LevelState, SoundCue,
    Termination, Vec2,
};
use runtime::{
    ChannelLevelController, ControllerEvent, Event, LevelEvent, LevelSignal, Runtime,
    RuntimeConfig, RuntimeError, StepOutcome, Topic,
};
use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;

fn level(rows: &[&str]) -> LevelState {
    LevelLoader::from_rows(rows).expect("level should parse")
}

async fn runtime_for(
    rows: &[&str],
    game_config: GameConfig,
) -> (Runtime, mpsc::UnboundedReceiver<LevelSignal>) {
    let (controller, signals) = ChannelLevelController::new();
    let runtime = Runtime::builder()
        .game_config(game_config)
        .level(level(rows))
        .level_controller(controller)
        .build()
        .await
        .expect("runtime should build");
    (runtime, signals)
}

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn footstep_pitches(events: &[Event]) -> Vec<f32> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Audio(audio) if audio.cue == SoundCue::Footsteps => Some(audio.pitch),
            _ => None,
        })
        .collect()
}

const CORRIDOR: &[&str] = &["#####", "#P..#", "#####"];

#[tokio::test(start_paused = true)]
async fn each_action_occupies_one_slot() {
    let (mut runtime, _signals) = runtime_for(CORRIDOR, GameConfig::default()).await;
    let mut controller_rx = runtime.subscribe(Topic::Controller);

    let started = Instant::now();
    let report = runtime
        .execute_actions(["moveright", "moveright"])
        .await
        .expect("queue should run");
    let elapsed = started.elapsed();

    assert!(elapsed >= Duration::from_millis(1000), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(1100), "elapsed {elapsed:?}");
    assert_eq!(report.executed, 2);
    assert_eq!(report.skipped, 0);
    assert!(!report.stopped_early);
    assert_eq!(report.summary.outcome, LevelOutcome::InProgress);
    assert_eq!(report.summary.actions_executed, 2);

    let state = runtime.handle().query_state().await.unwrap();
    assert_eq!(state.player.position.x, 3);
    assert_eq!(state.player.motion.current, Vec2::new(3.0, 1.0));
    assert!(!state.player.motion.is_moving);

    let settled = drain(&mut controller_rx)
        .into_iter()
        .filter(|event| {
            matches!(
                event,
                Event::Controller(ControllerEvent::MotionSettled { .. })
            )
        })
        .count();
    assert_eq!(settled, 2);
}

#[tokio::test(start_paused = true)]
async fn unknown_token_is_skipped_but_uses_its_slot() {
    let (mut runtime, _signals) = runtime_for(CORRIDOR, GameConfig::default()).await;
    let mut controller_rx = runtime.subscribe(Topic::Controller);

    let started = Instant::now();
    let report = runtime.execute_actions(["jump", "moveright"]).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(1000));
    assert_eq!(report.skipped, 1);
    assert_eq!(report.executed, 1);
    // Skipped tokens do not advance the nonce.
    assert_eq!(report.summary.actions_executed, 1);

    let events = drain(&mut controller_rx);
    assert!(events.iter().any(|event| matches!(
        event,
        Event::Controller(ControllerEvent::UnknownToken { index: 0, token }) if token == "jump"
    )));
}

#[tokio::test(start_paused = true)]
async fn ineffective_actions_are_reported_and_the_queue_continues() {
    let (mut runtime, _signals) = runtime_for(CORRIDOR, GameConfig::default()).await;
    let mut controller_rx = runtime.subscribe(Topic::Controller);

    let report = runtime
        .execute_actions(["swingup", "moveleft", "moveright"])
        .await
        .unwrap();

    assert_eq!(report.rejected, 2);
    assert_eq!(report.executed, 1);
    assert_eq!(report.summary.actions_executed, 3);

    let rejected: Vec<u64> = drain(&mut controller_rx)
        .into_iter()
        .filter_map(|event| match event {
            Event::Controller(ControllerEvent::ActionRejected { nonce, .. }) => Some(nonce),
            _ => None,
        })
        .collect();
    assert_eq!(rejected, vec![0, 1]);
}

#[tokio::test(start_paused = true)]
async fn pickup_with_a_full_inventory_is_rejected() {
    let (mut runtime, _signals) =
        runtime_for(&["#######", "#Ptttk#", "#######"], GameConfig::default()).await;
    let mut controller_rx = runtime.subscribe(Topic::Controller);

    let report = runtime
        .execute_actions([
            "moveright", "pickup", "moveright", "pickup", "moveright", "pickup", "moveright",
            "pickup",
        ])
        .await
        .unwrap();

    assert_eq!(report.executed, 7);
    assert_eq!(report.rejected, 1);
    assert!(!report.stopped_early);

    let errors: Vec<String> = drain(&mut controller_rx)
        .into_iter()
        .filter_map(|event| match event {
            Event::Controller(ControllerEvent::ActionRejected { nonce, error, .. }) => {
                assert_eq!(nonce, 7);
                Some(error)
            }
            _ => None,
        })
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("inventory is full"), "{}", errors[0]);

    let state = runtime.handle().query_state().await.unwrap();
    assert_eq!(state.entities.items.len(), 1);
    assert_eq!(state.entities.items[0].item.kind, ItemKind::Key);
}

#[tokio::test(start_paused = true)]
async fn touching_a_monster_loses_and_stops_the_queue() {
    let (mut runtime, mut signals) =
        runtime_for(&["#####", "#PM.#", "#####"], GameConfig::default()).await;
    let mut level_rx = runtime.subscribe(Topic::Level);

    let started = Instant::now();
    let report = runtime
        .execute_actions(["moveright", "moveright", "wait"])
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_millis(500));
    assert_eq!(report.executed, 1);
    assert!(report.stopped_early);
    assert_eq!(report.summary.outcome, LevelOutcome::Lost);

    match signals.try_recv() {
        Ok(LevelSignal::Lost(summary)) => assert_eq!(summary.outcome, LevelOutcome::Lost),
        other => panic!("expected a loss signal, got {other:?}"),
    }
    assert!(signals.try_recv().is_err());

    let events = drain(&mut level_rx);
    assert!(matches!(events[0], Event::Level(LevelEvent::Lost(_))));
    assert!(matches!(
        events[1],
        Event::Level(LevelEvent::QueueStopped { remaining: 2 })
    ));

    // A finished level ignores further queues.
    let again = runtime.execute_actions(["moveleft"]).await.unwrap();
    assert_eq!(again.executed, 0);
    assert!(again.stopped_early);
}

#[tokio::test(start_paused = true)]
async fn entering_an_open_door_wins_after_the_delay() {
    let (mut runtime, mut signals) =
        runtime_for(&["#####", "#PO.#", "#####"], GameConfig::default()).await;
    let mut level_rx = runtime.subscribe(Topic::Level);
    let mut audio_rx = runtime.subscribe(Topic::Audio);

    let started = Instant::now();
    let report = runtime
        .execute_actions(["moveright", "moveleft"])
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed >= Duration::from_millis(1250), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(1350), "elapsed {elapsed:?}");
    assert_eq!(report.executed, 1);
    assert!(report.stopped_early);
    assert_eq!(report.summary.outcome, LevelOutcome::Won);

    assert!(matches!(signals.try_recv(), Ok(LevelSignal::Won(_))));

    let events = drain(&mut level_rx);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::Level(LevelEvent::WinSequenceStarted))));
    assert!(matches!(events.last(), Some(Event::Level(LevelEvent::Won(_)))));

    let cues: Vec<SoundCue> = drain(&mut audio_rx)
        .into_iter()
        .filter_map(|event| match event {
            Event::Audio(audio) => Some(audio.cue),
            _ => None,
        })
        .collect();
    assert_eq!(cues, vec![SoundCue::Footsteps, SoundCue::DoorOpen]);
}

#[tokio::test(start_paused = true)]
async fn using_the_last_key_opens_the_door_and_wins() {
    let (mut runtime, mut signals) =
        runtime_for(&["#####", "#PkD#", "#####"], GameConfig::default()).await;

    let report = runtime
        .execute_actions(["moveright", "pickup", "moveright", "useitem0", "wait"])
        .await
        .unwrap();

    assert_eq!(report.executed, 4);
    assert_eq!(report.summary.outcome, LevelOutcome::Won);
    assert_eq!(report.summary.treasures_collected, 0);
    assert!(matches!(signals.try_recv(), Ok(LevelSignal::Won(_))));

    let state = runtime.handle().query_state().await.unwrap();
    assert!(state.player.inventory.iter().all(|slot| slot.is_none()));
    assert!(state.entities.doors[0].is_open());
}

#[tokio::test(start_paused = true)]
async fn win_through_the_handle_reaches_the_level_controller() {
    let (mut runtime, mut signals) =
        runtime_for(&["#####", "#PO.#", "#####"], GameConfig::default()).await;
    let handle = runtime.handle();
    let mut audio_rx = runtime.subscribe(Topic::Audio);

    let started = Instant::now();
    let step = handle.execute_token(ActionToken::MoveRight).await.unwrap();
    assert!(matches!(
        step,
        StepOutcome::Executed(ref outcome) if outcome.termination == Some(Termination::Won)
    ));
    assert!(signals.try_recv().is_err());

    handle.finish_win_sequence().await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(1250));
    assert!(matches!(signals.try_recv(), Ok(LevelSignal::Won(_))));

    let cues: Vec<SoundCue> = drain(&mut audio_rx)
        .into_iter()
        .filter_map(|event| match event {
            Event::Audio(audio) => Some(audio.cue),
            _ => None,
        })
        .collect();
    assert_eq!(cues, vec![SoundCue::Footsteps, SoundCue::DoorOpen]);

    // A later queue finds the level finished and reports nothing twice.
    let report = runtime.execute_actions(["wait"]).await.unwrap();
    assert_eq!(report.summary.outcome, LevelOutcome::Won);
    assert_eq!(report.executed, 0);
    assert!(signals.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn queue_after_a_handle_win_waits_for_the_win_sequence() {
    let (mut runtime, mut signals) =
        runtime_for(&["#####", "#PO.#", "#####"], GameConfig::default()).await;

    runtime
        .handle()
        .execute_token(ActionToken::MoveRight)
        .await
        .unwrap();
    let report = runtime.execute_actions(["wait"]).await.unwrap();

    assert!(report.stopped_early);
    assert!(matches!(signals.try_recv(), Ok(LevelSignal::Won(_))));
}

#[tokio::test(start_paused = true)]
async fn loss_through_the_handle_reaches_the_level_controller() {
    let (runtime, mut signals) =
        runtime_for(&["#####", "#PM.#", "#####"], GameConfig::default()).await;
    let mut level_rx = runtime.subscribe(Topic::Level);

    let step = runtime
        .handle()
        .execute_token(ActionToken::MoveRight)
        .await
        .unwrap();
    assert!(matches!(
        step,
        StepOutcome::Executed(ref outcome) if outcome.termination == Some(Termination::Lost)
    ));

    assert!(matches!(signals.try_recv(), Ok(LevelSignal::Lost(_))));
    let events = drain(&mut level_rx);
    assert!(matches!(
        events.as_slice(),
        [Event::Level(LevelEvent::Lost(summary))] if summary.outcome == LevelOutcome::Lost
    ));
}

#[tokio::test(start_paused = true)]
async fn swing_kills_monster_and_effect_expires() {
    let (mut runtime, _signals) =
        runtime_for(&["######", "#PsM.#", "######"], GameConfig::default()).await;
    let mut controller_rx = runtime.subscribe(Topic::Controller);
    let mut audio_rx = runtime.subscribe(Topic::Audio);

    let report = runtime
        .execute_actions(["moveright", "pickup", "swingright"])
        .await
        .unwrap();

    assert_eq!(report.executed, 3);
    assert_eq!(report.summary.monsters_killed, 1);
    assert_eq!(report.summary.outcome, LevelOutcome::InProgress);

    let events = drain(&mut controller_rx);
    let swing = events
        .iter()
        .position(|event| {
            matches!(
                event,
                Event::Controller(ControllerEvent::ActionExecuted { nonce: 2, feedback, .. })
                    if feedback.iter().any(|f| matches!(f, Feedback::MonsterRemoved(_)))
            )
        })
        .expect("swing should be reported");
    let expired = events
        .iter()
        .position(|event| {
            matches!(
                event,
                Event::Controller(ControllerEvent::SwingExpired { nonce: 2 })
            )
        })
        .expect("swing effect should expire within the slot");
    assert!(swing < expired);

    let cues: Vec<SoundCue> = drain(&mut audio_rx)
        .into_iter()
        .filter_map(|event| match event {
            Event::Audio(audio) => Some(audio.cue),
            _ => None,
        })
        .collect();
    assert_eq!(
        cues,
        vec![SoundCue::Footsteps, SoundCue::SwordPickup, SoundCue::SwordHit]
    );
}

#[tokio::test(start_paused = true)]
async fn stop_queue_interrupts_processing() {
    let (mut runtime, _signals) = runtime_for(CORRIDOR, GameConfig::default()).await;
    let handle = runtime.handle();
    let mut level_rx = runtime.subscribe(Topic::Level);

    tokio::spawn({
        let handle = handle.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(600)).await;
            handle.stop_queue();
        }
    });

    let started = Instant::now();
    let report = runtime
        .execute_actions(["wait", "wait", "wait", "wait"])
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_millis(700));
    assert_eq!(report.executed, 2);
    assert!(report.stopped_early);
    assert!(handle.is_queue_stopped());
    assert!(matches!(
        drain(&mut level_rx).as_slice(),
        [Event::Level(LevelEvent::QueueStopped { remaining: 2 })]
    ));

    // The next queue starts fresh.
    let report = runtime.execute_actions(["wait"]).await.unwrap();
    assert_eq!(report.executed, 1);
    assert!(!report.stopped_early);
    assert!(!handle.is_queue_stopped());
}

#[tokio::test(start_paused = true)]
async fn footsteps_pitch_is_seeded_and_bounded() {
    let config = GameConfig::default().with_rng_seed(42);
    let tokens = ["moveright", "moveright", "moveleft", "moveleft"];

    let mut runs = Vec::new();
    for _ in 0..2 {
        let (mut runtime, _signals) = runtime_for(CORRIDOR, config.clone()).await;
        let mut audio_rx = runtime.subscribe(Topic::Audio);
        runtime.execute_actions(tokens).await.unwrap();
        runs.push(footstep_pitches(&drain(&mut audio_rx)));
    }

    assert_eq!(runs[0].len(), 4);
    assert_eq!(runs[0], runs[1]);
    for pitch in &runs[0] {
        assert!((0.75..=1.25).contains(pitch), "pitch {pitch}");
    }
}

#[tokio::test]
async fn builder_requires_a_level_and_sane_config() {
    let missing = Runtime::builder().build().await;
    assert!(matches!(missing, Err(RuntimeError::MissingLevel)));

    let mut config = RuntimeConfig::default();
    config.frame_interval = Duration::ZERO;
    let invalid = Runtime::builder()
        .config(config)
        .level(level(CORRIDOR))
        .build()
        .await;
    assert!(matches!(invalid, Err(RuntimeError::InvalidConfig(_))));

    let negative = Runtime::builder()
        .game_config(GameConfig::default().with_time_between_actions(-1.0))
        .level(level(CORRIDOR))
        .build()
        .await;
    assert!(matches!(negative, Err(RuntimeError::InvalidConfig(_))));

    let huge = Runtime::builder()
        .game_config(GameConfig::default().with_time_between_actions(1e20))
        .level(level(CORRIDOR))
        .build()
        .await;
    assert!(matches!(huge, Err(RuntimeError::InvalidConfig(_))));

    let huge_delay = Runtime::builder()
        .game_config(GameConfig {
            win_delay: 1e20,
            ..GameConfig::default()
        })
        .level(level(CORRIDOR))
        .build()
        .await;
    assert!(matches!(huge_delay, Err(RuntimeError::InvalidConfig(_))));
}
