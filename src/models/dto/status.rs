use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Which dashboard a status is computed for. The teacher drill-down awards
/// "Mastered" where the student results page awards "Completed".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusView {
    #[default]
    Student,
    Teacher,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionStatus {
    NotStarted,
    Completed,
    Mastered,
    AdvancedStruggling,
    IntermediateExcelling,
    Intermediate,
    BeginnerReadyToAdvance,
    BeginnerPracticing,
    JustStarted,
    Level(String),
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionStatus::NotStarted => f.write_str("Not Started"),
            CompletionStatus::Completed => f.write_str("Completed"),
            CompletionStatus::Mastered => f.write_str("Mastered"),
            CompletionStatus::AdvancedStruggling => f.write_str("Advanced (Struggling)"),
            CompletionStatus::IntermediateExcelling => f.write_str("Intermediate (Excelling)"),
            CompletionStatus::Intermediate => f.write_str("Intermediate"),
            CompletionStatus::BeginnerReadyToAdvance => f.write_str("Beginner (Ready to Advance)"),
            CompletionStatus::BeginnerPracticing => f.write_str("Beginner (Practicing)"),
            CompletionStatus::JustStarted => f.write_str("Just Started"),
            CompletionStatus::Level(level) => write!(f, "Level {}", level),
        }
    }
}

impl Serialize for CompletionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Colour band used next to a mastery percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformanceBand {
    #[serde(rename = "Excellent Performance")]
    Excellent,
    #[serde(rename = "Good Performance")]
    Good,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

/// Grade word shown next to an exam score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreLabel {
    Excellent,
    Good,
    Satisfactory,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "direction", rename_all = "camelCase")]
pub enum Trend {
    Improving { delta: f64 },
    Declining { delta: f64 },
    Stable { delta: f64 },
    InsufficientData,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Improving { .. } => "improving",
            Trend::Declining { .. } => "declining",
            Trend::Stable { .. } => "stable",
            Trend::InsufficientData => "insufficient data",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_are_exact() {
        assert_eq!(CompletionStatus::NotStarted.to_string(), "Not Started");
        assert_eq!(
            CompletionStatus::BeginnerReadyToAdvance.to_string(),
            "Beginner (Ready to Advance)"
        );
        assert_eq!(
            CompletionStatus::Level("Expert".to_string()).to_string(),
            "Level Expert"
        );
    }

    #[test]
    fn status_serializes_as_label() {
        let json = serde_json::to_string(&CompletionStatus::AdvancedStruggling).unwrap();
        assert_eq!(json, "\"Advanced (Struggling)\"");
    }

    #[test]
    fn trend_serializes_with_direction_tag() {
        let json = serde_json::to_value(Trend::Improving { delta: 12.0 }).unwrap();
        assert_eq!(json["direction"], "improving");
        assert_eq!(json["delta"], 12.0);

        let json = serde_json::to_value(Trend::InsufficientData).unwrap();
        assert_eq!(json["direction"], "insufficientData");
    }
}
