// 🏆 Progress Tracker - attempts, passes, score and level

use serde::{Deserialize, Serialize};

/// Points needed to clear `level`. Grows linearly from 100.
pub fn threshold(level: u32) -> u64 {
    100 + (level.saturating_sub(1) as u64) * 60
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub level: u32,
}

/// Invariant: `score < threshold(level)` after every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub attempts: u64,
    pub passes: u64,
    pub score: u64,
    pub level: u32,
}

impl Default for ProgressState {
    fn default() -> Self {
        ProgressState {
            attempts: 0,
            passes: 0,
            score: 0,
            level: 1,
        }
    }
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_attempt(&mut self, passed: bool) {
        self.attempts += 1;
        if passed {
            self.passes += 1;
        }
    }

    /// Add points and roll overflow into level-ups, possibly several.
    pub fn award(&mut self, points: u64) -> Vec<LevelUp> {
        let mut events = Vec::new();
        self.score = self.score.saturating_add(points);

        while self.score >= threshold(self.level) {
            self.score -= threshold(self.level);
            self.level += 1;
            events.push(LevelUp { level: self.level });
        }

        events
    }

    /// Pass rate in whole percent, rounded half up. Zero before any attempt.
    pub fn accuracy(&self) -> u32 {
        if self.attempts == 0 {
            return 0;
        }
        ((self.passes * 200 + self.attempts) / (self.attempts * 2)) as u32
    }

    pub fn next_threshold(&self) -> u64 {
        threshold(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_curve() {
        assert_eq!(threshold(1), 100);
        assert_eq!(threshold(2), 160);
        assert_eq!(threshold(5), 340);
    }

    #[test]
    fn test_award_single_level_up() {
        let mut p = ProgressState::new();
        let events = p.award(250);

        assert_eq!(events, vec![LevelUp { level: 2 }]);
        assert_eq!(p.level, 2);
        assert_eq!(p.score, 150);
        assert!(p.score < p.next_threshold());
    }

    #[test]
    fn test_award_multi_level_jump() {
        let mut p = ProgressState::new();
        // 100 + 160 + 220 = 480
        let events = p.award(500);

        assert_eq!(
            events,
            vec![LevelUp { level: 2 }, LevelUp { level: 3 }, LevelUp { level: 4 }]
        );
        assert_eq!(p.score, 20);
    }

    #[test]
    fn test_award_exact_threshold() {
        let mut p = ProgressState::new();
        assert_eq!(p.award(100).len(), 1);
        assert_eq!(p.score, 0);
        assert!(p.award(0).is_empty());
    }

    #[test]
    fn test_accuracy() {
        let mut p = ProgressState::new();
        assert_eq!(p.accuracy(), 0);

        p.record_attempt(true);
        p.record_attempt(false);
        p.record_attempt(true);
        assert_eq!(p.accuracy(), 67);

        let half = ProgressState {
            attempts: 8,
            passes: 1,
            ..ProgressState::default()
        };
        assert_eq!(half.accuracy(), 13); // 12.5 rounds up
    }
}
