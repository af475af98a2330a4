use serde::{Deserialize, Serialize};

pub mod pitch;

pub use pitch::{Accidental, Letter, Pitch, PitchParseError};

pub type Seconds = f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// One note of a song. `sustain` only controls how long the note is drawn;
/// judging looks at `onset` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    #[serde(rename = "note", alias = "pitch")]
    pub pitch: Pitch,
    #[serde(rename = "time", alias = "onset")]
    pub onset: Seconds,
    #[serde(rename = "duration", alias = "sustain", default)]
    pub sustain: Seconds,
}

impl NoteEvent {
    pub fn new(pitch: Pitch, onset: Seconds, sustain: Seconds) -> Self {
        Self {
            pitch,
            onset,
            sustain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub bpm: f64,
    pub notes: Vec<NoteEvent>,
    pub duration: Seconds,
}

impl Song {
    /// Latest onset in the song, or 0 for an empty song.
    pub fn last_onset(&self) -> Seconds {
        self.notes
            .iter()
            .map(|n| n.onset)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_uses_note_time_duration_field_names() {
        let v = serde_json::json!({
            "id": "ode",
            "title": "Ode to Joy",
            "artist": "Beethoven",
            "difficulty": "easy",
            "bpm": 120,
            "notes": [
                { "note": "E4", "time": 2.0, "duration": 0.4 },
                { "note": "F#4", "time": 2.5, "duration": 0.4 }
            ],
            "duration": 10.0
        });

        let song: Song = serde_json::from_value(v).unwrap();
        assert_eq!(song.difficulty, Difficulty::Easy);
        assert_eq!(song.notes.len(), 2);
        assert_eq!(song.notes[1].pitch.to_string(), "F#4");
        assert_eq!(song.notes[1].onset, 2.5);
        assert_eq!(song.last_onset(), 2.5);

        let json = serde_json::to_value(&song.notes[0]).unwrap();
        assert_eq!(json["note"], "E4");
        assert_eq!(json["time"], 2.0);
        assert_eq!(json["duration"], 0.4);
    }

    #[test]
    fn note_accepts_onset_aliases_and_default_sustain() {
        let v = serde_json::json!({ "pitch": "C4", "onset": 1.0 });
        let note: NoteEvent = serde_json::from_value(v).unwrap();
        assert_eq!(note.onset, 1.0);
        assert_eq!(note.sustain, 0.0);
    }

    #[test]
    fn invalid_pitch_fails_song_parse() {
        let v = serde_json::json!({
            "id": "bad",
            "title": "t",
            "artist": "a",
            "difficulty": "hard",
            "notes": [{ "note": "Q4", "time": 1.0 }],
            "duration": 2.0
        });
        assert!(serde_json::from_value::<Song>(v).is_err());
    }
}
