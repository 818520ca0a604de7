//! Per-hole stroke tracking
//!
//! Fed from `LevelComplete` events by the host. The simulation itself only
//! reports stroke counts.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// How a hole was played relative to par
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoleResult {
    HoleInOne,
    Birdie,
    Par,
    Bogey,
    Over,
}

impl HoleResult {
    pub fn classify(strokes: u32, par: u32) -> Self {
        if strokes == 1 {
            HoleResult::HoleInOne
        } else if strokes < par {
            HoleResult::Birdie
        } else if strokes == par {
            HoleResult::Par
        } else if strokes == par + 1 {
            HoleResult::Bogey
        } else {
            HoleResult::Over
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HoleResult::HoleInOne => "HOLE IN ONE!",
            HoleResult::Birdie => "BIRDIE!",
            HoleResult::Par => "PAR",
            HoleResult::Bogey => "BOGEY",
            HoleResult::Over => "HOLE COMPLETE",
        }
    }
}

/// A single completed hole
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub level_id: u32,
    pub strokes: u32,
}

/// Strokes per hole, in play order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreCard {
    pub entries: Vec<ScoreEntry>,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished hole. A repeat of the same level replaces the
    /// earlier entry.
    pub fn record(&mut self, level_id: u32, strokes: u32) {
        match self.entries.iter_mut().find(|e| e.level_id == level_id) {
            Some(entry) => entry.strokes = strokes,
            None => self.entries.push(ScoreEntry { level_id, strokes }),
        }
    }

    /// Record any `LevelComplete` in `event`. Returns whether it was one.
    pub fn observe(&mut self, event: &GameEvent) -> bool {
        if let GameEvent::LevelComplete { level_id, strokes } = *event {
            self.record(level_id, strokes);
            true
        } else {
            false
        }
    }

    pub fn strokes_for(&self, level_id: u32) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.level_id == level_id)
            .map(|e| e.strokes)
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.strokes).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(HoleResult::classify(1, 3), HoleResult::HoleInOne);
        assert_eq!(HoleResult::classify(2, 3), HoleResult::Birdie);
        assert_eq!(HoleResult::classify(3, 3), HoleResult::Par);
        assert_eq!(HoleResult::classify(4, 3), HoleResult::Bogey);
        assert_eq!(HoleResult::classify(7, 3), HoleResult::Over);
        // Ace on a par 1 is still an ace
        assert_eq!(HoleResult::classify(1, 1), HoleResult::HoleInOne);
        assert_eq!(HoleResult::classify(5, 3).label(), "HOLE COMPLETE");
    }

    #[test]
    fn test_total_and_replace() {
        let mut card = ScoreCard::new();
        card.record(1, 3);
        card.record(2, 4);
        assert_eq!(card.total(), 7);
        card.record(1, 2);
        assert_eq!(card.total(), 6);
        assert_eq!(card.strokes_for(1), Some(2));
        assert_eq!(card.strokes_for(3), None);
        card.reset();
        assert!(card.is_empty());
    }

    #[test]
    fn test_observe_only_completions() {
        let mut card = ScoreCard::new();
        assert!(!card.observe(&GameEvent::StrokeTaken { strokes: 1 }));
        assert!(card.observe(&GameEvent::LevelComplete {
            level_id: 2,
            strokes: 5
        }));
        assert_eq!(card.total(), 5);
    }
}
