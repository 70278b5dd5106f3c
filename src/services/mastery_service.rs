use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::constants::MasteryThresholds;
use crate::models::domain::{Level, QuizAttempt, QuizCounts, TopicMastery};
use crate::models::dto::stats::TopicSummary;

/// Rounds to one decimal place, half away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Formats a percentage the way dashboards print it, e.g. `"72.5"`.
pub fn format_tenths(value: f64) -> String {
    format!("{:.1}", round_to_tenth(value))
}

/// Plain mean; `0.0` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

pub struct MasteryService;

impl MasteryService {
    /// Normalized `{correct, incorrect}` for a topic; `{0, 0}` when the
    /// student has no record for it.
    pub fn extract_quiz_data(topic: Option<&TopicMastery>) -> QuizCounts {
        topic.map(TopicMastery::counts).unwrap_or_default()
    }

    /// Correct share of practice answers, rounded to one decimal.
    pub fn mastery_percentage(topic: Option<&TopicMastery>) -> f64 {
        Self::percentage_of(Self::extract_quiz_data(topic))
    }

    pub fn percentage_of(counts: QuizCounts) -> f64 {
        let total = counts.total();
        if total == 0 {
            return 0.0;
        }
        round_to_tenth(counts.correct as f64 / total as f64 * 100.0)
    }

    /// Applies one answered question to a topic's counters.
    ///
    /// Practice answers create the record on first use and bump exactly one
    /// counter. An attempt without a timestamp keeps the previous
    /// `last_updated`. Exam answers never touch the counters and never create a
    /// record.
    pub fn record_attempt(
        topic: Option<TopicMastery>,
        attempt: &QuizAttempt,
    ) -> Option<TopicMastery> {
        if !attempt.is_practice() {
            return topic;
        }

        let mut topic = topic.unwrap_or_else(|| TopicMastery {
            current_level: Some(Level::Easy),
            ..TopicMastery::default()
        });
        if attempt.is_correct {
            topic.topic_quiz.correct = topic.topic_quiz.correct.saturating_add(1);
        } else {
            topic.topic_quiz.incorrect = topic.topic_quiz.incorrect.saturating_add(1);
        }
        if attempt.timestamp.is_some() {
            topic.topic_quiz.last_updated = attempt.timestamp;
        }
        Some(topic)
    }

    /// Stores the level the scoring API moved the student to.
    pub fn apply_new_level(
        topic: Option<TopicMastery>,
        new_level: Level,
        at: DateTime<Utc>,
    ) -> TopicMastery {
        let mut topic = topic.unwrap_or_default().with_level(new_level);
        topic.topic_quiz.last_updated = Some(at);
        topic
    }

    /// Topic-selection header numbers: topics with at least one practice
    /// answer, their mean (unrounded) mastery, and how many sit at the top
    /// tier with enough correct answers.
    pub fn topic_summary(
        topics: &BTreeMap<String, TopicMastery>,
        thresholds: &MasteryThresholds,
    ) -> TopicSummary {
        let attempted: Vec<&TopicMastery> = topics
            .values()
            .filter(|t| t.counts().total() > 0)
            .collect();

        let average_topic_score = mean(attempted.iter().map(|t| {
            let counts = t.counts();
            counts.correct as f64 / counts.total() as f64 * 100.0
        }));

        let mastered_topics = attempted
            .iter()
            .filter(|t| {
                t.current_level.as_ref().is_some_and(Level::is_top_tier)
                    && t.topic_quiz.correct >= thresholds.mastered_min_correct
            })
            .count();

        TopicSummary {
            topics_attempted: attempted.len(),
            average_topic_score,
            mastered_topics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::QuizType;
    use chrono::TimeZone;

    fn topic(correct: u32, incorrect: u32) -> TopicMastery {
        TopicMastery::new(correct, incorrect, Some(Level::Medium))
    }

    #[test]
    fn absent_topic_has_zero_counts_and_percentage() {
        assert_eq!(MasteryService::extract_quiz_data(None), QuizCounts::new(0, 0));
        assert_eq!(MasteryService::mastery_percentage(None), 0.0);
    }

    #[test]
    fn zero_attempts_is_zero_percent() {
        assert_eq!(MasteryService::mastery_percentage(Some(&topic(0, 0))), 0.0);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(MasteryService::mastery_percentage(Some(&topic(7, 3))), 70.0);
        assert_eq!(MasteryService::mastery_percentage(Some(&topic(2, 1))), 66.7);
        assert_eq!(MasteryService::mastery_percentage(Some(&topic(1, 2))), 33.3);
        assert_eq!(MasteryService::mastery_percentage(Some(&topic(8, 1))), 88.9);
        assert_eq!(MasteryService::mastery_percentage(Some(&topic(5, 0))), 100.0);
    }

    #[test]
    fn percentage_matches_formula_over_a_grid() {
        for c in 0..15u32 {
            for i in 0..15u32 {
                let expected = if c + i == 0 {
                    0.0
                } else {
                    (1000.0 * c as f64 / (c + i) as f64).round() / 10.0
                };
                assert_eq!(
                    MasteryService::mastery_percentage(Some(&topic(c, i))),
                    expected,
                    "c={} i={}",
                    c,
                    i
                );
            }
        }
    }

    #[test]
    fn format_tenths_pads_one_decimal() {
        assert_eq!(format_tenths(0.0), "0.0");
        assert_eq!(format_tenths(70.0), "70.0");
        assert_eq!(format_tenths(66.666), "66.7");
    }

    #[test]
    fn practice_attempt_creates_and_increments() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let attempt = QuizAttempt::practice("Algebra", Level::Easy, true, at);

        let topic = MasteryService::record_attempt(None, &attempt).unwrap();
        assert_eq!(topic.counts(), QuizCounts::new(1, 0));
        assert_eq!(topic.current_level, Some(Level::Easy));
        assert_eq!(topic.topic_quiz.last_updated, Some(at));

        let wrong = QuizAttempt::practice("Algebra", Level::Easy, false, at);
        let topic = MasteryService::record_attempt(Some(topic), &wrong).unwrap();
        assert_eq!(topic.counts(), QuizCounts::new(1, 1));
    }

    #[test]
    fn exam_attempts_leave_counters_alone() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut attempt = QuizAttempt::practice("Algebra", Level::Hard, true, at);
        attempt.quiz_type = QuizType::Exam;

        assert!(MasteryService::record_attempt(None, &attempt).is_none());

        let before = topic(3, 2);
        let after = MasteryService::record_attempt(Some(before.clone()), &attempt);
        assert_eq!(after, Some(before));
    }

    #[test]
    fn untimed_attempt_keeps_previous_last_updated() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut untimed = QuizAttempt::practice("Algebra", Level::Easy, true, at);
        untimed.timestamp = None;

        let fresh = MasteryService::record_attempt(None, &untimed).unwrap();
        assert_eq!(fresh.topic_quiz.last_updated, None);

        let mut seen = topic(2, 1);
        seen.topic_quiz.last_updated = Some(at);
        let topic = MasteryService::record_attempt(Some(seen), &untimed).unwrap();
        assert_eq!(topic.counts(), QuizCounts::new(3, 1));
        assert_eq!(topic.topic_quiz.last_updated, Some(at));
    }

    #[test]
    fn counters_never_decrease_across_attempts() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut current: Option<TopicMastery> = None;
        let mut previous_total = 0;
        for (n, correct) in [true, false, false, true, true].into_iter().enumerate() {
            let attempt = QuizAttempt::practice("Sets", Level::Easy, correct, at);
            current = MasteryService::record_attempt(current, &attempt);
            let total = MasteryService::extract_quiz_data(current.as_ref()).total();
            assert_eq!(total as usize, n + 1);
            assert!(total > previous_total);
            previous_total = total;
        }
    }

    #[test]
    fn new_level_replaces_current_level() {
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let topic = MasteryService::apply_new_level(Some(topic(4, 1)), Level::Hard, at);

        assert_eq!(topic.current_level, Some(Level::Hard));
        assert_eq!(topic.counts(), QuizCounts::new(4, 1));
    }

    #[test]
    fn topic_summary_skips_untouched_topics() {
        let mut topics = BTreeMap::new();
        topics.insert("Algebra".to_string(), TopicMastery::new(3, 1, Some(Level::Hard)));
        topics.insert("Geometry".to_string(), TopicMastery::new(1, 1, Some(Level::Easy)));
        topics.insert("Sets".to_string(), TopicMastery::new(0, 0, Some(Level::Hard)));

        let summary = MasteryService::topic_summary(&topics, &MasteryThresholds::default());

        assert_eq!(summary.topics_attempted, 2);
        assert_eq!(summary.average_topic_score, 62.5);
        assert_eq!(summary.mastered_topics, 1);
    }
}
