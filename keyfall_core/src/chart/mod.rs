use std::sync::Arc;

use keyfall_schema::{NoteEvent, Seconds, Song};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitTier {
    Perfect,
    Good,
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteStatus {
    #[default]
    Upcoming,
    Perfect,
    Good,
    Ok,
    Missed,
}

impl NoteStatus {
    pub fn is_upcoming(self) -> bool {
        matches!(self, Self::Upcoming)
    }
}

impl From<HitTier> for NoteStatus {
    fn from(tier: HitTier) -> Self {
        match tier {
            HitTier::Perfect => Self::Perfect,
            HitTier::Good => Self::Good,
            HitTier::Ok => Self::Ok,
        }
    }
}

/// Immutable note sequence of one song. Cloning shares the notes.
#[derive(Debug, Clone)]
pub struct Timeline {
    song_id: Arc<str>,
    notes: Arc<[NoteEvent]>,
    duration: Seconds,
}

impl Timeline {
    /// Builds the timeline for the selected song, refusing to run without one.
    pub fn from_selection(song: Option<&Song>) -> Result<Self, EngineError> {
        let song = song.ok_or(EngineError::NoSongSelected)?;
        Self::from_song(song)
    }

    pub fn from_song(song: &Song) -> Result<Self, EngineError> {
        Self::new(&song.id, song.notes.clone(), song.duration)
    }

    pub fn new(
        song_id: &str,
        notes: Vec<NoteEvent>,
        duration: Seconds,
    ) -> Result<Self, EngineError> {
        if notes.is_empty() {
            return Err(EngineError::EmptyTimeline {
                song_id: song_id.to_string(),
            });
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(EngineError::InvalidDuration {
                song_id: song_id.to_string(),
                duration,
            });
        }
        if let Some((index, note)) = notes
            .iter()
            .enumerate()
            .find(|(_, n)| !n.onset.is_finite() || n.onset < 0.0)
        {
            return Err(EngineError::InvalidOnset {
                song_id: song_id.to_string(),
                index,
                onset: note.onset,
            });
        }

        Ok(Self {
            song_id: Arc::from(song_id),
            notes: notes.into(),
            duration,
        })
    }

    pub fn song_id(&self) -> &str {
        &self.song_id
    }

    pub fn notes(&self) -> &[NoteEvent] {
        &self.notes
    }

    pub fn get(&self, index: usize) -> Option<&NoteEvent> {
        self.notes.get(index)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn duration(&self) -> Seconds {
        self.duration
    }
}
