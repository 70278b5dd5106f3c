use serde::Serialize;

use crate::models::domain::ExamQuestion;
use crate::models::dto::request::TopicFilter;

/// One score range of the exam distribution chart. A score belongs to the
/// bucket with the greatest `min_score` not above it; the lowest bucket
/// also takes every score below its own minimum.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBucket {
    pub label: String,
    pub range: String,
    pub min_score: f64,
}

impl ScoreBucket {
    pub fn new(label: &str, range: &str, min_score: f64) -> Self {
        Self {
            label: label.to_string(),
            range: range.to_string(),
            min_score,
        }
    }

    /// 90–100, 80–89.99, 70–79.99 and 0–69.99.
    pub fn standard() -> Vec<ScoreBucket> {
        vec![
            ScoreBucket::new("Excellent", "90-100%", 90.0),
            ScoreBucket::new("Good", "80-89%", 80.0),
            ScoreBucket::new("Satisfactory", "70-79%", 70.0),
            ScoreBucket::new("Needs Improvement", "0-69%", 0.0),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketCount {
    pub label: String,
    pub range: String,
    pub count: usize,
    /// Whole-number share of all exams analyzed.
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicStats {
    pub filter: TopicFilter,
    pub total_students: usize,
    pub average_score: String,
    pub total_topic_questions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamStats {
    pub filter: TopicFilter,
    pub total_students: usize,
    pub average_score: String,
    pub total_exams_taken: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicExamAverage {
    pub topic: String,
    pub average_score: f64,
    pub exam_count: usize,
}

/// Exam answers attributed to a topic, summed over every exam covering it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicExamTally {
    pub topic: String,
    pub correct: u64,
    pub incorrect: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub topics_attempted: usize,
    pub average_topic_score: f64,
    pub mastered_topics: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RankBadge {
    First,
    Second,
    Third,
    Standard,
}

impl RankBadge {
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            1 => RankBadge::First,
            2 => RankBadge::Second,
            3 => RankBadge::Third,
            _ => RankBadge::Standard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub badge: RankBadge,
    pub student_id: String,
    pub student_name: String,
    pub score: f64,
}

/// What the review panel can show for one exam.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ExamReview {
    /// The exam predates per-question tracking.
    NotRecorded,
    AllCorrect,
    NeedsReview { wrong_answers: Vec<ExamQuestion> },
}
