use crate::constants::messages;
use crate::constants::MasteryThresholds;
use crate::models::domain::{Level, TopicMastery};
use crate::models::dto::status::{CompletionStatus, PerformanceBand, StatusView};
use crate::services::mastery_service::MasteryService;

pub struct StatusService;

impl StatusService {
    /// Student results page: the top tier is finished once enough answers
    /// have been given there, regardless of accuracy.
    pub fn is_completed(topic: &TopicMastery, thresholds: &MasteryThresholds) -> bool {
        let top_tier = topic.current_level.as_ref().is_some_and(Level::is_top_tier);
        top_tier && topic.counts().total() >= thresholds.completed_min_attempts
    }

    /// Teacher drill-down: the top tier is mastered with enough correct
    /// answers at a passing accuracy. Unlike [`Self::is_completed`], accuracy
    /// counts here and volume does not.
    pub fn is_mastered(topic: &TopicMastery, thresholds: &MasteryThresholds) -> bool {
        let top_tier = topic.current_level.as_ref().is_some_and(Level::is_top_tier);
        top_tier
            && topic.topic_quiz.correct >= thresholds.mastered_min_correct
            && MasteryService::mastery_percentage(Some(topic)) >= thresholds.advanced_min_percentage
    }

    /// Maps a topic record to its dashboard label. Rules are checked in
    /// order and the first match wins.
    pub fn classify(
        topic: Option<&TopicMastery>,
        view: StatusView,
        thresholds: &MasteryThresholds,
    ) -> CompletionStatus {
        let Some(topic) = topic else {
            return CompletionStatus::NotStarted;
        };
        let Some(level) = topic.current_level.as_ref() else {
            return CompletionStatus::NotStarted;
        };

        let percentage = MasteryService::mastery_percentage(Some(topic));
        let total = topic.counts().total();

        if level.is_top_tier() {
            match view {
                StatusView::Student if Self::is_completed(topic, thresholds) => {
                    return CompletionStatus::Completed;
                }
                StatusView::Teacher if Self::is_mastered(topic, thresholds) => {
                    return CompletionStatus::Mastered;
                }
                _ => {}
            }
            if percentage < thresholds.advanced_min_percentage {
                return CompletionStatus::AdvancedStruggling;
            }
        }

        match level {
            Level::Medium if percentage >= thresholds.excelling_min_percentage => {
                CompletionStatus::IntermediateExcelling
            }
            Level::Medium => CompletionStatus::Intermediate,
            Level::Easy if percentage >= thresholds.excelling_min_percentage => {
                CompletionStatus::BeginnerReadyToAdvance
            }
            Level::Easy if total >= thresholds.practicing_min_attempts => {
                CompletionStatus::BeginnerPracticing
            }
            Level::Easy => CompletionStatus::JustStarted,
            other => CompletionStatus::Level(other.to_string()),
        }
    }

    pub fn performance_band(percentage: f64) -> PerformanceBand {
        if percentage >= 80.0 {
            PerformanceBand::Excellent
        } else if percentage >= 60.0 {
            PerformanceBand::Good
        } else {
            PerformanceBand::NeedsImprovement
        }
    }

    pub fn next_level_hint(level: Option<&Level>) -> &'static str {
        match level {
            Some(Level::Easy) => "Medium Level",
            Some(Level::Medium) => "Hard Level",
            _ => "Topic Mastered",
        }
    }

    /// Encouragement shown under a topic on the results page. Uses the
    /// unrounded accuracy, so 89.96% is still "Excellent" and not "Outstanding".
    pub fn topic_feedback_message(topic: Option<&TopicMastery>) -> Option<&'static str> {
        let counts = topic?.counts();
        let total = counts.total();
        let percentage = if total > 0 {
            counts.correct as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Some(if percentage >= 90.0 {
            messages::TOPIC_OUTSTANDING
        } else if percentage >= 80.0 {
            messages::TOPIC_EXCELLENT
        } else if percentage >= 70.0 {
            messages::TOPIC_GOOD
        } else if percentage >= 60.0 {
            messages::TOPIC_PROGRESSING
        } else {
            messages::TOPIC_NEEDS_ATTENTION
        })
    }
}
