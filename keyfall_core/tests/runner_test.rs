use std::thread;
use std::time::{Duration, Instant};

use keyfall_core::audio::{AudioCommand, AudioHandle, NullAudio};
use keyfall_core::chart::HitTier;
use keyfall_core::gameplay::{Phase, RunId};
use keyfall_core::input::events::InputEvent;
use keyfall_core::time::{Clock, ManualClock};
use keyfall_core::{EngineError, SessionConfig, SessionRunner};
use keyfall_schema::{Difficulty, NoteEvent, Pitch, Song};

fn p(name: &str) -> Pitch {
    name.parse().unwrap()
}

fn test_song() -> Song {
    Song {
        id: "duo".to_string(),
        title: "Duo".to_string(),
        artist: "Test".to_string(),
        difficulty: Difficulty::Easy,
        bpm: 120.0,
        notes: vec![
            NoteEvent::new(p("C4"), 1.0, 0.5),
            NoteEvent::new(p("G4"), 2.0, 0.5),
        ],
        duration: 3.0,
    }
}

fn fast_config() -> SessionConfig {
    SessionConfig {
        countdown_interval_ms: 2,
        ..SessionConfig::default()
    }
}

fn wait_for_playing<A: keyfall_core::audio::AudioSink>(runner: &mut SessionRunner<ManualClock, A>) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while runner.pump() == Phase::Countdown {
        assert!(Instant::now() < deadline, "countdown never finished");
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn test_start_refuses_without_song() {
    let result = SessionRunner::start(None, fast_config(), ManualClock::new(0.0), NullAudio);
    assert!(matches!(result, Err(EngineError::NoSongSelected)));
}

#[test]
fn test_start_refuses_song_without_notes() {
    let mut song = test_song();
    song.notes.clear();
    let result = SessionRunner::start(Some(&song), fast_config(), ManualClock::new(0.0), NullAudio);
    assert!(matches!(result, Err(EngineError::EmptyTimeline { .. })));
}

#[test]
fn test_runner_plays_a_song_to_the_end() {
    let clock = ManualClock::new(50.0);
    let (audio, audio_rx) = AudioHandle::channel();
    let song = test_song();
    let mut runner = SessionRunner::start(Some(&song), fast_config(), clock.clone(), audio).unwrap();

    assert!(runner.is_ticking());
    assert_eq!(runner.session().countdown(), Some(3));

    wait_for_playing(&mut runner);
    // Leaving the countdown cancels the timer.
    assert!(!runner.is_ticking());
    assert_eq!(runner.session().run_id(), RunId::FIRST);

    clock.set(51.0);
    runner.press(p("C4"));
    runner.release(p("C4"));
    runner.pump();
    assert_eq!(runner.session().score().perfect, 1);
    assert_eq!(
        runner.session().last_judgment().map(|j| j.tier),
        Some(HitTier::Perfect)
    );
    assert_eq!(
        audio_rx.try_recv().unwrap(),
        AudioCommand::PlayPitch { pitch: p("C4") }
    );
    // Releases make no sound.
    assert!(audio_rx.try_recv().is_err());

    clock.set(60.0);
    assert_eq!(runner.pump(), Phase::Finished);

    let result = runner.result().unwrap();
    assert_eq!(result.song_id, "duo");
    assert_eq!(result.score.perfect, 1);
    assert_eq!(result.score.misses, 1);
    assert_eq!(result.accuracy, 50);
    runner.teardown();
}

#[test]
fn test_input_from_another_thread() {
    let clock = ManualClock::new(0.0);
    let song = test_song();
    let mut runner = SessionRunner::start(Some(&song), fast_config(), clock.clone(), NullAudio).unwrap();
    wait_for_playing(&mut runner);

    clock.advance(2.1);
    let sender = runner.input_sender();
    let stamp = clock.clone();
    thread::spawn(move || {
        sender.send(InputEvent::press(p("G4"), stamp.now())).unwrap();
    })
    .join()
    .unwrap();

    runner.pump();
    assert_eq!(runner.session().score().perfect, 1);
}

#[test]
fn test_replay_starts_a_fresh_run() {
    let clock = ManualClock::new(0.0);
    let song = test_song();
    let mut runner = SessionRunner::start(Some(&song), fast_config(), clock.clone(), NullAudio).unwrap();
    wait_for_playing(&mut runner);

    clock.advance(1.0);
    runner.press(p("C4"));
    clock.advance(10.0);
    assert_eq!(runner.pump(), Phase::Finished);
    assert_eq!(runner.session().score().processed(), 2);

    // Leftover input from the finished run must not reach the next one.
    runner.press(p("C4"));
    let run_id = runner.replay().unwrap();
    assert_eq!(run_id, RunId::FIRST.next());
    assert!(runner.is_ticking());
    assert_eq!(runner.phase(), Phase::Countdown);
    assert_eq!(runner.session().score().processed(), 0);
    assert_eq!(runner.session().score().max_combo, 0);
    assert_eq!(runner.session().tracker().unresolved_count(), 2);

    wait_for_playing(&mut runner);
    assert_eq!(runner.session().elapsed(), 0.0);
    assert_eq!(runner.session().score().processed(), 0);
    runner.teardown();
}

#[test]
fn test_teardown_during_countdown_stops_ticker() {
    let config = SessionConfig {
        countdown_interval_ms: 60_000,
        ..SessionConfig::default()
    };
    let song = test_song();
    let mut runner = SessionRunner::start(Some(&song), config, ManualClock::new(0.0), NullAudio).unwrap();
    assert_eq!(runner.pump(), Phase::Countdown);

    let started = Instant::now();
    runner.teardown();
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_stalled_host_still_sees_every_countdown_value() {
    let song = test_song();
    let mut runner = SessionRunner::start(Some(&song), fast_config(), ManualClock::new(0.0), NullAudio).unwrap();

    // Several ticks pile up while nobody pumps.
    thread::sleep(Duration::from_millis(50));

    let mut seen = vec![];
    while runner.phase() == Phase::Countdown {
        runner.pump();
        if let Some(n) = runner.session().countdown() {
            seen.push(n);
        }
    }
    assert_eq!(seen, vec![2, 1]);
    assert_eq!(runner.phase(), Phase::Playing);
    runner.teardown();
}
