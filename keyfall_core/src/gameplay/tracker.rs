use keyfall_schema::{NoteEvent, Pitch};

use crate::chart::{NoteStatus, Timeline};

/// Per-note status for one run.
///
/// `resolve` is the only way a status changes and it only ever moves a note
/// out of `Upcoming`, so a note is judged or missed at most once no matter
/// how press handling and the miss sweep interleave.
#[derive(Debug, Clone)]
pub struct NoteTracker {
    timeline: Timeline,
    statuses: Vec<NoteStatus>,
    pending: usize,
}

impl NoteTracker {
    pub fn new(timeline: Timeline) -> Self {
        let statuses = vec![NoteStatus::Upcoming; timeline.len()];
        let pending = statuses.len();
        Self {
            timeline,
            statuses,
            pending,
        }
    }

    /// Discards every status and starts over from `timeline`.
    pub fn reset(&mut self, timeline: Timeline) {
        *self = Self::new(timeline);
    }

    /// Moves note `index` from `Upcoming` to `outcome`.
    ///
    /// Returns `false` without touching anything when the note is already
    /// resolved, the index is out of range, or `outcome` is `Upcoming`.
    pub fn resolve(&mut self, index: usize, outcome: NoteStatus) -> bool {
        if outcome.is_upcoming() {
            return false;
        }
        match self.statuses.get_mut(index) {
            Some(status) if status.is_upcoming() => {
                *status = outcome;
                self.pending -= 1;
                true
            }
            _ => false,
        }
    }

    /// Indices of unresolved notes with the given pitch, in timeline order.
    pub fn unresolved_with_pitch(&self, pitch: &Pitch) -> Vec<usize> {
        self.timeline
            .notes()
            .iter()
            .zip(&self.statuses)
            .enumerate()
            .filter(|(_, (note, status))| status.is_upcoming() && note.pitch == *pitch)
            .map(|(i, _)| i)
            .collect()
    }

    /// Resolves every remaining note as missed and returns how many there were.
    pub fn miss_all_remaining(&mut self) -> usize {
        let mut missed = 0;
        for status in self.statuses.iter_mut().filter(|s| s.is_upcoming()) {
            *status = NoteStatus::Missed;
            missed += 1;
        }
        self.pending -= missed;
        missed
    }

    pub fn status(&self, index: usize) -> Option<NoteStatus> {
        self.statuses.get(index).copied()
    }

    pub fn note(&self, index: usize) -> Option<&NoteEvent> {
        self.timeline.get(index)
    }

    pub fn unresolved_count(&self) -> usize {
        self.pending
    }

    pub fn all_resolved(&self) -> bool {
        self.pending == 0
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Notes paired with their current status, for renderers.
    pub fn iter(&self) -> impl Iterator<Item = (&NoteEvent, NoteStatus)> + '_ {
        self.timeline
            .notes()
            .iter()
            .zip(self.statuses.iter().copied())
    }
}
