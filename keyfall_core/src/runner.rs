use crossbeam_channel::Sender;
use keyfall_schema::{Pitch, Song};
use tracing::{debug, info, warn};

use crate::audio::{AudioSink, NullAudio};
use crate::chart::Timeline;
use crate::config::SessionConfig;
use crate::error::EngineError;
use crate::gameplay::{Phase, RunId, Session, SessionResult};
use crate::input::events::InputEvent;
use crate::input::InputQueue;
use crate::time::{Clock, MonotonicClock, Ticker};

/// Host-side owner of the current session.
///
/// Holds the countdown ticker, the input queue and the audio sink, and feeds
/// all of them into the session from a single thread via `pump`. The ticker
/// is cancelled as soon as the countdown ends, on replay, and on teardown.
pub struct SessionRunner<C = MonotonicClock, A = NullAudio> {
    clock: C,
    audio: A,
    config: SessionConfig,
    timeline: Timeline,
    session: Session,
    ticker: Option<Ticker>,
    input: InputQueue,
}

impl<C: Clock, A: AudioSink> SessionRunner<C, A> {
    /// Starts the first run of `song`. Fails when no usable song is selected.
    pub fn start(
        song: Option<&Song>,
        config: SessionConfig,
        clock: C,
        audio: A,
    ) -> Result<Self, EngineError> {
        let timeline = match Timeline::from_selection(song) {
            Ok(timeline) => timeline,
            Err(e) => {
                warn!(error = %e, "refusing to start session");
                return Err(e);
            }
        };
        let ticker = Ticker::spawn(config.countdown_interval()).map_err(EngineError::Ticker)?;
        let session = Session::new(RunId::FIRST, timeline.clone(), config.clone());

        Ok(Self {
            clock,
            audio,
            config,
            timeline,
            session,
            ticker: Some(ticker),
            input: InputQueue::new(),
        })
    }

    /// Applies at most one pending countdown tick and all key events, then
    /// runs one frame.
    /// Call once per display refresh.
    pub fn pump(&mut self) -> Phase {
        let now = self.clock.now();

        // One countdown step per frame so every value is shown at least once,
        // even when the host fell behind and several ticks are queued.
        if let Some(ticker) = &self.ticker {
            if self.session.phase() == Phase::Countdown && ticker.try_recv().is_some() {
                self.session.countdown_tick(now);
            }
        }
        if self.session.phase() != Phase::Countdown {
            self.stop_ticker();
        }

        for event in self.input.drain() {
            if event.pressed {
                self.audio.play_pitch(event.pitch);
                self.session.press(&event.pitch, event.timestamp);
            } else {
                self.session.release(&event.pitch);
            }
        }

        self.session.tick(now)
    }

    /// Queues a press stamped with the runner's clock.
    pub fn press(&self, pitch: Pitch) {
        self.input.push(InputEvent::press(pitch, self.clock.now()));
    }

    pub fn release(&self, pitch: Pitch) {
        self.input.push(InputEvent::release(pitch, self.clock.now()));
    }

    /// Sender for an input thread. Events must be stamped with this
    /// runner's clock.
    pub fn input_sender(&self) -> Sender<InputEvent> {
        self.input.sender()
    }

    /// Throws the current run away and starts a fresh one with the next run
    /// id. Input queued for the old run is discarded.
    pub fn replay(&mut self) -> Result<RunId, EngineError> {
        self.stop_ticker();
        let discarded = self.input.clear();

        let ticker =
            Ticker::spawn(self.config.countdown_interval()).map_err(EngineError::Ticker)?;
        let run_id = self.session.run_id().next();
        self.session = Session::new(run_id, self.timeline.clone(), self.config.clone());
        self.ticker = Some(ticker);

        info!(%run_id, discarded, "replay");
        Ok(run_id)
    }

    /// Cancels the ticker and drops the session.
    pub fn teardown(mut self) {
        self.stop_ticker();
        info!(run_id = %self.session.run_id(), "session torn down");
    }

    fn stop_ticker(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
            debug!(run_id = %self.session.run_id(), "countdown ticker cancelled");
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn result(&self) -> Option<SessionResult> {
        self.session.result()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
