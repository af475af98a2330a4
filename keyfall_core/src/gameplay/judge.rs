use keyfall_schema::{Pitch, Seconds};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::chart::{HitTier, NoteStatus};
use crate::gameplay::tracker::NoteTracker;

#[derive(Debug, Clone, PartialEq)]
pub struct JudgmentResult {
    pub note_index: usize,
    pub tier: HitTier,
    pub pitch: Pitch,
    /// `elapsed - onset`; negative means the press was early.
    pub delta: f64,
}

/// Timing windows in seconds (half-width, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeWindows {
    pub perfect: Seconds,
    pub good: Seconds,
    /// Also the acceptance window: beyond it nothing is judged and the
    /// sweep expires the note.
    pub ok: Seconds,
}

impl Default for JudgeWindows {
    fn default() -> Self {
        Self {
            perfect: 0.15,
            good: 0.30,
            ok: 0.50,
        }
    }
}

impl JudgeWindows {
    pub fn acceptance(&self) -> Seconds {
        self.ok
    }

    pub fn classify(&self, abs_delta: f64) -> Option<HitTier> {
        if abs_delta <= self.perfect {
            Some(HitTier::Perfect)
        } else if abs_delta <= self.good {
            Some(HitTier::Good)
        } else if abs_delta <= self.ok {
            Some(HitTier::Ok)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Judge {
    pub windows: JudgeWindows,
}

impl Judge {
    pub fn new(windows: JudgeWindows) -> Self {
        Self { windows }
    }

    /// Judges a press of `pitch` at `elapsed` against the closest unresolved
    /// note of that pitch. Returns `None` when there is nothing in range.
    pub fn process_press(
        &self,
        pitch: &Pitch,
        elapsed: Seconds,
        tracker: &mut NoteTracker,
    ) -> Option<JudgmentResult> {
        let mut best: Option<(usize, f64, Seconds)> = None;

        for index in tracker.unresolved_with_pitch(pitch) {
            let Some(note) = tracker.note(index) else {
                continue;
            };
            let diff = (note.onset - elapsed).abs();
            let closer = match best {
                None => true,
                // Equidistant notes go to the earlier onset; candidates come in
                // index order so a full tie keeps the lower index.
                Some((_, best_diff, best_onset)) => {
                    diff < best_diff || (diff == best_diff && note.onset < best_onset)
                }
            };
            if closer {
                best = Some((index, diff, note.onset));
            }
        }

        let (note_index, diff, onset) = best?;
        let tier = self.windows.classify(diff)?;

        if !tracker.resolve(note_index, tier.into()) {
            return None;
        }

        debug!(note_index, %pitch, ?tier, diff, "judged press");
        Some(JudgmentResult {
            note_index,
            tier,
            pitch: *pitch,
            delta: elapsed - onset,
        })
    }

    /// Expires every unresolved note whose window closed before `elapsed`.
    /// Returns how many notes were newly missed.
    pub fn sweep_misses(&self, elapsed: Seconds, tracker: &mut NoteTracker) -> usize {
        let acceptance = self.windows.acceptance();
        let expired: Vec<usize> = tracker
            .iter()
            .enumerate()
            .filter(|(_, (note, status))| {
                status.is_upcoming() && elapsed - note.onset > acceptance
            })
            .map(|(i, _)| i)
            .collect();

        let missed = expired
            .into_iter()
            .filter(|&i| tracker.resolve(i, NoteStatus::Missed))
            .count();

        if missed > 0 {
            trace!(missed, elapsed, "swept expired notes");
        }
        missed
    }
}
