use std::str::FromStr;

use anyhow::{bail, Context};
use keyfall_core::gameplay::{Phase, RunId, Session};
use keyfall_core::{SessionConfig, SessionResult, Timeline};
use keyfall_schema::{Pitch, Seconds, Song};
use tracing::debug;

/// A press at `at` seconds into the song, written `PITCH@SECONDS` (`C#4@1.25`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedPress {
    pub pitch: Pitch,
    pub at: Seconds,
}

impl FromStr for ScriptedPress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pitch, at) = s
            .split_once('@')
            .ok_or_else(|| format!("expected PITCH@SECONDS, got `{s}`"))?;
        let pitch: Pitch = pitch.parse().map_err(|e| format!("{e}"))?;
        let at: Seconds = at
            .trim()
            .parse()
            .map_err(|_| format!("invalid press time in `{s}`"))?;
        if !at.is_finite() || at < 0.0 {
            return Err(format!("press time must be >= 0 in `{s}`"));
        }
        Ok(Self { pitch, at })
    }
}

/// One press exactly on every note.
pub fn autoplay(song: &Song) -> Vec<ScriptedPress> {
    song.notes
        .iter()
        .map(|n| ScriptedPress {
            pitch: n.pitch,
            at: n.onset,
        })
        .collect()
}

/// Plays `song` against a scripted press sequence on a simulated clock.
///
/// The countdown runs at its configured interval, then frames advance at
/// `frame_rate`. Presses are delivered before the frame that follows them,
/// stamped with their exact time.
pub fn run_simulation(
    song: &Song,
    presses: &[ScriptedPress],
    config: &SessionConfig,
    frame_rate: f64,
) -> anyhow::Result<SessionResult> {
    if !(frame_rate.is_finite() && frame_rate > 0.0) {
        bail!("frame rate must be positive, got {frame_rate}");
    }

    let timeline =
        Timeline::from_song(song).with_context(|| format!("cannot start song `{}`", song.id))?;
    let mut session = Session::new(RunId::FIRST, timeline, config.clone());

    let interval = config.countdown_interval().as_secs_f64();
    let mut now = 0.0;
    while session.phase() == Phase::Countdown {
        now += interval;
        session.countdown_tick(now);
    }
    let start = now;

    let mut presses = presses.to_vec();
    presses.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut pending = presses.iter().peekable();

    let dt = 1.0 / frame_rate;
    let deadline = song.duration.max(0.0) + config.finish_grace.max(0.0);
    let max_frames = (deadline * frame_rate).ceil() as u64 + 2;

    for frame in 1..=max_frames {
        let frame_time = start + frame as f64 * dt;
        while let Some(press) = pending.next_if(|p| start + p.at <= frame_time) {
            if let Some(hit) = session.press(&press.pitch, start + press.at) {
                debug!(pitch = %hit.pitch, tier = ?hit.tier, delta = hit.delta, "scripted hit");
            }
        }
        if session.tick(frame_time) == Phase::Finished {
            break;
        }
    }

    session
        .result()
        .context("session did not finish within the song length")
}
