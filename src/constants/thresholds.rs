use serde::{Deserialize, Serialize};

pub const COMPLETED_MIN_ATTEMPTS: u32 = 9;
pub const MASTERED_MIN_CORRECT: u32 = 3;
pub const ADVANCED_MIN_PERCENTAGE: f64 = 70.0;
pub const EXCELLING_MIN_PERCENTAGE: f64 = 80.0;
pub const PRACTICING_MIN_ATTEMPTS: u32 = 5;

/// Exams below this score are not counted as passed.
pub const PASSING_SCORE: f64 = 60.0;

pub const TREND_WINDOW: usize = 5;
pub const TREND_MIN_POINTS: usize = 3;
pub const TREND_DELTA: f64 = 5.0;

pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Thresholds used to classify a topic's completion status. `Default`
/// yields the values the dashboards ship with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MasteryThresholds {
    /// Attempts at the top tier needed before a topic counts as completed.
    pub completed_min_attempts: u32,
    /// Correct answers at the top tier needed before a topic counts as mastered.
    pub mastered_min_correct: u32,
    /// Below this mastery a top-tier student is struggling.
    pub advanced_min_percentage: f64,
    /// At or above this mastery an Easy/Medium student is excelling.
    pub excelling_min_percentage: f64,
    /// Easy-tier attempts after which a student is practicing rather than just started.
    pub practicing_min_attempts: u32,
}

impl Default for MasteryThresholds {
    fn default() -> Self {
        Self {
            completed_min_attempts: COMPLETED_MIN_ATTEMPTS,
            mastered_min_correct: MASTERED_MIN_CORRECT,
            advanced_min_percentage: ADVANCED_MIN_PERCENTAGE,
            excelling_min_percentage: EXCELLING_MIN_PERCENTAGE,
            practicing_min_attempts: PRACTICING_MIN_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_match_contract_values() {
        let t = MasteryThresholds::default();

        assert_eq!(t.completed_min_attempts, 9);
        assert_eq!(t.mastered_min_correct, 3);
        assert_eq!(t.advanced_min_percentage, 70.0);
        assert_eq!(t.excelling_min_percentage, 80.0);
        assert_eq!(t.practicing_min_attempts, 5);
    }
}
