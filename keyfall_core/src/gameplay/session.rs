use keyfall_schema::{NoteEvent, Pitch, Seconds};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::chart::{HitTier, NoteStatus, Timeline};
use crate::config::SessionConfig;
use crate::gameplay::judge::{Judge, JudgmentResult};
use crate::gameplay::result::{RunId, SessionResult};
use crate::gameplay::score::{ScoreBoard, ScoreEvent, ScoreState};
use crate::gameplay::tracker::NoteTracker;
use crate::time::SessionClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Countdown,
    Playing,
    Finished,
}

/// The most recent successful judgment, stamped with the elapsed time of the
/// press. Consumers compare the stamp against the current time instead of
/// waiting for a clear event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LastJudgment {
    pub tier: HitTier,
    pub pitch: Pitch,
    pub at: Seconds,
}

impl LastJudgment {
    pub fn is_visible(&self, elapsed: Seconds, ttl: Seconds) -> bool {
        elapsed - self.at < ttl
    }
}

/// One run of one song: countdown → playing → finished.
///
/// A session never goes back to an earlier phase. Replaying means building
/// a new `Session` with the next `RunId`.
#[derive(Debug, Clone)]
pub struct Session {
    run_id: RunId,
    config: SessionConfig,
    judge: Judge,
    tracker: NoteTracker,
    score: ScoreBoard,
    phase: Phase,
    countdown: u32,
    clock: SessionClock,
    last_judgment: Option<LastJudgment>,
}

impl Session {
    pub fn new(run_id: RunId, timeline: Timeline, config: SessionConfig) -> Self {
        let total_notes = timeline.len() as u32;
        let countdown = config.countdown_ticks.max(1);
        info!(
            %run_id,
            song = timeline.song_id(),
            notes = total_notes,
            countdown,
            "session created"
        );

        Self {
            run_id,
            judge: Judge::new(config.judge),
            score: ScoreBoard::new(total_notes, config.scoring),
            tracker: NoteTracker::new(timeline),
            config,
            phase: Phase::Countdown,
            countdown,
            clock: SessionClock::default(),
            last_judgment: None,
        }
    }

    /// One step of the countdown timer. The step that reaches zero starts
    /// play with `now` as the zero point of elapsed time.
    pub fn countdown_tick(&mut self, now: Seconds) -> Phase {
        if self.phase != Phase::Countdown {
            return self.phase;
        }

        self.countdown -= 1;
        if self.countdown == 0 {
            self.clock.start(now);
            self.phase = Phase::Playing;
            info!(run_id = %self.run_id, start = now, "playing");
        } else {
            debug!(run_id = %self.run_id, remaining = self.countdown, "countdown");
        }
        self.phase
    }

    /// Per-frame update while playing: advance elapsed time, expire notes
    /// whose window has closed, and finish when nothing is left to judge or
    /// the song plus grace period is over.
    pub fn tick(&mut self, now: Seconds) -> Phase {
        if self.phase != Phase::Playing {
            return self.phase;
        }

        let elapsed = self.clock.sample(now);
        let missed = self.judge.sweep_misses(elapsed, &mut self.tracker);
        if missed > 0 {
            self.score.apply(ScoreEvent::MissBatch(missed as u32));
        }

        let deadline = self.tracker.timeline().duration() + self.config.finish_grace;
        if self.tracker.all_resolved() || elapsed > deadline {
            self.finish();
        }
        self.phase
    }

    /// Handles a key press stamped with host time `now`. Presses outside the
    /// playing phase, or stamped before it began, are ignored.
    pub fn press(&mut self, pitch: &Pitch, now: Seconds) -> Option<JudgmentResult> {
        if self.phase != Phase::Playing {
            trace!(%pitch, phase = ?self.phase, "press ignored");
            return None;
        }
        let elapsed = self.clock.elapsed_at(now)?;

        let result = self.judge.process_press(pitch, elapsed, &mut self.tracker)?;
        self.score.apply(ScoreEvent::Judgment(result.tier));
        self.last_judgment = Some(LastJudgment {
            tier: result.tier,
            pitch: result.pitch,
            at: elapsed,
        });
        Some(result)
    }

    /// Key releases carry no meaning for judging.
    pub fn release(&mut self, _pitch: &Pitch) {}

    fn finish(&mut self) {
        let forced = self.tracker.miss_all_remaining();
        if forced > 0 {
            self.score.apply(ScoreEvent::MissBatch(forced as u32));
        }
        self.phase = Phase::Finished;
        // Elapsed time stops here, so nothing would ever expire it.
        self.last_judgment = None;

        let score = self.score.state();
        info!(
            run_id = %self.run_id,
            points = score.points,
            accuracy = score.accuracy(),
            max_combo = score.max_combo,
            forced_misses = forced,
            "finished"
        );
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Remaining countdown value while counting down.
    pub fn countdown(&self) -> Option<u32> {
        (self.phase == Phase::Countdown).then_some(self.countdown)
    }

    pub fn elapsed(&self) -> Seconds {
        self.clock.elapsed()
    }

    /// Fraction of the song played, clamped to 1.
    pub fn progress(&self) -> f64 {
        let duration = self.tracker.timeline().duration();
        if duration <= 0.0 {
            return if self.phase == Phase::Countdown { 0.0 } else { 1.0 };
        }
        (self.elapsed() / duration).min(1.0)
    }

    pub fn score(&self) -> &ScoreState {
        self.score.state()
    }

    pub fn accuracy(&self) -> u32 {
        self.score.state().accuracy()
    }

    /// Last judgment if it is still within its display time.
    pub fn last_judgment(&self) -> Option<&LastJudgment> {
        let ttl = self.config.feedback_ttl();
        self.last_judgment
            .as_ref()
            .filter(|j| j.is_visible(self.elapsed(), ttl))
    }

    pub fn notes(&self) -> impl Iterator<Item = (&NoteEvent, NoteStatus)> + '_ {
        self.tracker.iter()
    }

    pub fn tracker(&self) -> &NoteTracker {
        &self.tracker
    }

    pub fn timeline(&self) -> &Timeline {
        self.tracker.timeline()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Final result, available once the session has finished.
    pub fn result(&self) -> Option<SessionResult> {
        (self.phase == Phase::Finished).then(|| {
            SessionResult::new(
                self.run_id,
                self.timeline().song_id(),
                *self.score.state(),
            )
        })
    }
}
