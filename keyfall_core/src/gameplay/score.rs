use serde::{Deserialize, Serialize};

use crate::chart::HitTier;

/// Points awarded per tier. A miss is always worth nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRules {
    pub perfect: u32,
    pub good: u32,
    pub ok: u32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            perfect: 100,
            good: 75,
            ok: 50,
        }
    }
}

impl ScoreRules {
    pub fn points_for(&self, tier: HitTier) -> u32 {
        match tier {
            HitTier::Perfect => self.perfect,
            HitTier::Good => self.good,
            HitTier::Ok => self.ok,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    Judgment(HitTier),
    MissBatch(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub points: u32,
    pub perfect: u32,
    pub good: u32,
    pub ok: u32,
    pub misses: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub total_notes: u32,
}

impl ScoreState {
    pub fn new(total_notes: u32) -> Self {
        Self {
            total_notes,
            ..Self::default()
        }
    }

    pub fn hits(&self) -> u32 {
        self.perfect + self.good + self.ok
    }

    pub fn processed(&self) -> u32 {
        self.hits() + self.misses
    }

    pub fn remaining(&self) -> u32 {
        self.total_notes.saturating_sub(self.processed())
    }

    pub fn is_complete(&self) -> bool {
        self.processed() == self.total_notes
    }

    /// Percentage of processed notes that were hit, rounded; 100 before
    /// anything has been processed.
    pub fn accuracy(&self) -> u32 {
        let processed = self.processed();
        if processed == 0 {
            return 100;
        }
        (f64::from(self.hits()) * 100.0 / f64::from(processed)).round() as u32
    }

    pub fn stars(&self) -> u8 {
        star_rating(self.accuracy())
    }
}

pub fn star_rating(accuracy: u32) -> u8 {
    match accuracy {
        95.. => 5,
        85..=94 => 4,
        70..=84 => 3,
        50..=69 => 2,
        _ => 1,
    }
}

/// Accumulates judgment and miss events into a `ScoreState`.
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    rules: ScoreRules,
    state: ScoreState,
}

impl ScoreBoard {
    pub fn new(total_notes: u32, rules: ScoreRules) -> Self {
        Self {
            rules,
            state: ScoreState::new(total_notes),
        }
    }

    pub fn state(&self) -> &ScoreState {
        &self.state
    }

    pub fn apply(&mut self, event: ScoreEvent) {
        match event {
            ScoreEvent::Judgment(tier) => self.record_hit(tier),
            ScoreEvent::MissBatch(count) => self.record_misses(count),
        }
    }

    fn record_hit(&mut self, tier: HitTier) {
        debug_assert!(self.state.remaining() > 0, "hit recorded past total_notes");
        let s = &mut self.state;
        s.points += self.rules.points_for(tier);
        match tier {
            HitTier::Perfect => s.perfect += 1,
            HitTier::Good => s.good += 1,
            HitTier::Ok => s.ok += 1,
        }
        s.combo += 1;
        s.max_combo = s.max_combo.max(s.combo);
    }

    fn record_misses(&mut self, count: u32) {
        let count = count.min(self.state.remaining());
        if count == 0 {
            return;
        }
        self.state.misses += count;
        self.state.combo = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_thresholds() {
        assert_eq!(star_rating(100), 5);
        assert_eq!(star_rating(95), 5);
        assert_eq!(star_rating(94), 4);
        assert_eq!(star_rating(85), 4);
        assert_eq!(star_rating(70), 3);
        assert_eq!(star_rating(50), 2);
        assert_eq!(star_rating(49), 1);
        assert_eq!(star_rating(0), 1);
    }

    #[test]
    fn empty_miss_batch_is_ignored() {
        let mut board = ScoreBoard::new(2, ScoreRules::default());
        board.apply(ScoreEvent::Judgment(HitTier::Good));
        board.apply(ScoreEvent::MissBatch(0));
        assert_eq!(board.state().combo, 1);
        assert_eq!(board.state().misses, 0);
    }

    #[test]
    fn miss_batch_is_clamped_to_remaining_notes() {
        let mut board = ScoreBoard::new(3, ScoreRules::default());
        board.apply(ScoreEvent::Judgment(HitTier::Ok));
        board.apply(ScoreEvent::MissBatch(10));
        assert_eq!(board.state().misses, 2);
        assert!(board.state().is_complete());
    }
}
