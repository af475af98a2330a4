use std::time::Duration;

use keyfall_schema::Seconds;
use serde::{Deserialize, Serialize};

use crate::gameplay::judge::JudgeWindows;
use crate::gameplay::score::ScoreRules;

/// Tunables of a session. Every field has a default, so a config file only
/// needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Visible countdown values before play (3 → "3, 2, 1").
    pub countdown_ticks: u32,
    pub countdown_interval_ms: u64,
    /// Extra time after the song's duration before unresolved notes are
    /// forced to missed.
    pub finish_grace: Seconds,
    /// How long the last judgment stays visible.
    pub feedback_ms: u64,
    pub judge: JudgeWindows,
    pub scoring: ScoreRules,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            countdown_ticks: 3,
            countdown_interval_ms: 1000,
            finish_grace: 2.0,
            feedback_ms: 600,
            judge: JudgeWindows::default(),
            scoring: ScoreRules::default(),
        }
    }
}

impl SessionConfig {
    pub fn countdown_interval(&self) -> Duration {
        Duration::from_millis(self.countdown_interval_ms)
    }

    pub fn feedback_ttl(&self) -> Seconds {
        self.feedback_ms as f64 / 1000.0
    }
}
