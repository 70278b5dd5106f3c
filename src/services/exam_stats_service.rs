use std::collections::BTreeMap;

use crate::constants::messages;
use crate::constants::thresholds::{PASSING_SCORE, TREND_DELTA, TREND_MIN_POINTS, TREND_WINDOW};
use crate::models::domain::{ExamQuestion, ExamResult};
use crate::models::dto::stats::{
    BucketCount, ExamReview, ScoreBucket, TopicExamAverage, TopicExamTally,
};
use crate::models::dto::status::{ScoreLabel, Trend};
use crate::services::mastery_service::{mean, round_to_tenth};

pub struct ExamStatsService;

impl ExamStatsService {
    /// Mean score. Records with an unreadable score count as 0 rather than
    /// being skipped.
    pub fn exam_average(exams: &[ExamResult]) -> f64 {
        mean(exams.iter().map(|e| e.score))
    }

    pub fn best_score(exams: &[ExamResult]) -> f64 {
        exams
            .iter()
            .map(|e| e.score)
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    pub fn exams_passed(exams: &[ExamResult]) -> usize {
        exams.iter().filter(|e| e.score >= PASSING_SCORE).count()
    }

    /// Counts every exam into exactly one bucket. Scores above the top range
    /// land in the highest bucket and negative scores in the lowest one, so
    /// the counts always add up to `exams.len()`.
    pub fn score_distribution(exams: &[ExamResult], buckets: &[ScoreBucket]) -> Vec<BucketCount> {
        if buckets.is_empty() {
            return Vec::new();
        }

        let mut by_min: Vec<usize> = (0..buckets.len()).collect();
        by_min.sort_by(|&a, &b| buckets[b].min_score.total_cmp(&buckets[a].min_score));
        let lowest = by_min[by_min.len() - 1];

        let mut counts = vec![0usize; buckets.len()];
        for exam in exams {
            let slot = by_min
                .iter()
                .copied()
                .find(|&i| exam.score >= buckets[i].min_score)
                .unwrap_or(lowest);
            counts[slot] += 1;
        }

        let total = exams.len();
        buckets
            .iter()
            .zip(counts)
            .map(|(bucket, count)| BucketCount {
                label: bucket.label.clone(),
                range: bucket.range.clone(),
                count,
                percentage: if total == 0 {
                    0
                } else {
                    (count as f64 / total as f64 * 100.0).round() as u32
                },
            })
            .collect()
    }

    pub fn exams_covering<'a>(
        exams: &'a [ExamResult],
        topic: &'a str,
    ) -> impl Iterator<Item = &'a ExamResult> + 'a {
        exams.iter().filter(move |e| e.covers(topic))
    }

    pub fn topic_exam_average(exams: &[ExamResult], topic: &str) -> f64 {
        mean(Self::exams_covering(exams, topic).map(|e| e.score))
    }

    /// Average per topic for every topic at least one exam covered, in the
    /// order the topics are given.
    pub fn topic_exam_averages<'a>(
        exams: &[ExamResult],
        topics: impl IntoIterator<Item = &'a str>,
    ) -> Vec<TopicExamAverage> {
        topics
            .into_iter()
            .filter_map(|topic| {
                let scores: Vec<f64> = Self::exams_covering(exams, topic).map(|e| e.score).collect();
                if scores.is_empty() {
                    return None;
                }
                Some(TopicExamAverage {
                    topic: topic.to_string(),
                    exam_count: scores.len(),
                    average_score: round_to_tenth(mean(scores)),
                })
            })
            .collect()
    }

    /// Direction of a run of exams given oldest first. Needs at least three
    /// points before it will call a direction.
    pub fn trend(oldest_first: &[ExamResult]) -> Trend {
        if oldest_first.len() < TREND_MIN_POINTS {
            return Trend::InsufficientData;
        }
        let (Some(first), Some(last)) = (oldest_first.first(), oldest_first.last()) else {
            return Trend::InsufficientData;
        };

        let delta = last.score - first.score;
        if delta > TREND_DELTA {
            Trend::Improving { delta }
        } else if delta < -TREND_DELTA {
            Trend::Declining { delta }
        } else {
            Trend::Stable { delta }
        }
    }

    /// Trend over the most recent exams in any input order. Exams with an
    /// unreadable timestamp count as the oldest.
    pub fn recent_trend(exams: &[ExamResult]) -> Trend {
        let mut ordered: Vec<ExamResult> = exams.to_vec();
        ordered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        let start = ordered.len().saturating_sub(TREND_WINDOW);
        Self::trend(&ordered[start..])
    }

    pub fn score_label(score: f64) -> ScoreLabel {
        if score >= 80.0 {
            ScoreLabel::Excellent
        } else if score >= 70.0 {
            ScoreLabel::Good
        } else if score >= 60.0 {
            ScoreLabel::Satisfactory
        } else {
            ScoreLabel::Poor
        }
    }

    pub fn exam_feedback_message(score: f64) -> &'static str {
        if score >= 90.0 {
            messages::EXAM_OUTSTANDING
        } else if score >= 80.0 {
            messages::EXAM_EXCELLENT
        } else if score >= 70.0 {
            messages::EXAM_GOOD
        } else if score >= 60.0 {
            messages::EXAM_PASSED
        } else {
            messages::EXAM_NEEDS_STUDY
        }
    }

    /// Sums each exam's `correct`/`totalQuestions` into every topic it
    /// covers. A multi-topic exam is attributed in full to each topic.
    pub fn topic_tallies(exams: &[ExamResult]) -> Vec<TopicExamTally> {
        let mut tallies: BTreeMap<&str, TopicExamTally> = BTreeMap::new();
        for exam in exams {
            for topic in &exam.topics {
                let tally = tallies.entry(topic.as_str()).or_insert_with(|| TopicExamTally {
                    topic: topic.clone(),
                    ..TopicExamTally::default()
                });
                tally.correct += exam.correct as u64;
                tally.total += exam.total_questions as u64;
                tally.incorrect = tally.total.saturating_sub(tally.correct);
            }
        }
        tallies.into_values().collect()
    }

    pub fn review(exam: &ExamResult) -> ExamReview {
        let questions = match exam.questions.as_deref() {
            None | Some([]) => return ExamReview::NotRecorded,
            Some(questions) => questions,
        };

        let wrong_answers: Vec<ExamQuestion> =
            questions.iter().filter(|q| is_wrong(q)).cloned().collect();
        if wrong_answers.is_empty() {
            ExamReview::AllCorrect
        } else {
            ExamReview::NeedsReview { wrong_answers }
        }
    }
}

/// An explicit correctness flag wins; without one the answers are compared.
fn is_wrong(question: &ExamQuestion) -> bool {
    match question.is_correct {
        Some(correct) => !correct,
        None => question.user_answer != question.correct_answer,
    }
}
