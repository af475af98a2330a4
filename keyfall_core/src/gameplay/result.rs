use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gameplay::score::ScoreState;

/// Identifies one run of a song. A replay gets the next id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(u64);

impl RunId {
    pub const FIRST: RunId = RunId(1);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run#{}", self.0)
    }
}

/// Final outcome of a finished run, handed to the results display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub run_id: RunId,
    pub song_id: String,
    pub score: ScoreState,
    pub accuracy: u32,
    pub stars: u8,
}

impl SessionResult {
    pub fn new(run_id: RunId, song_id: impl Into<String>, score: ScoreState) -> Self {
        Self {
            run_id,
            song_id: song_id.into(),
            accuracy: score.accuracy(),
            stars: score.stars(),
            score,
        }
    }
}
