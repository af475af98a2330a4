use keyfall_core::time::{Clock, ManualClock, SessionClock};

#[test]
fn test_manual_clock_is_shared_between_clones() {
    let clock = ManualClock::new(10.0);
    let other = clock.clone();

    other.advance(0.5);
    assert!((clock.now() - 10.5).abs() < 1e-9);

    clock.set(20.0);
    assert_eq!(other.now(), 20.0);
}

#[test]
fn test_session_clock_starts_at_zero() {
    let mut clock = SessionClock::default();

    // Nothing moves before play starts.
    assert_eq!(clock.sample(5.0), 0.0);
    assert_eq!(clock.elapsed_at(5.0), None);

    clock.start(10.0);
    assert_eq!(clock.elapsed(), 0.0);
    assert!((clock.sample(10.25) - 0.25).abs() < 1e-9);
}

#[test]
fn test_session_clock_never_goes_backwards() {
    let mut clock = SessionClock::default();
    clock.start(10.0);

    clock.sample(12.0);
    // A stale host timestamp must not rewind elapsed time.
    assert_eq!(clock.sample(11.0), 2.0);
    assert_eq!(clock.elapsed(), 2.0);
}

#[test]
fn test_elapsed_at_rejects_instants_before_start() {
    let mut clock = SessionClock::default();
    clock.start(3.0);

    assert_eq!(clock.elapsed_at(2.9), None);
    assert_eq!(clock.elapsed_at(3.0), Some(0.0));
    assert_eq!(clock.elapsed_at(4.5), Some(1.5));
    // Reading does not update the clock.
    assert_eq!(clock.elapsed(), 0.0);
}
