use serde::Serialize;

use crate::models::domain::{ExamResult, Feedback, Level};
use crate::models::dto::activity::ActivityItem;
use crate::models::dto::request::TopicFilter;
use crate::models::dto::stats::{
    BucketCount, ExamReview, ExamStats, LeaderboardEntry, TopicExamAverage, TopicExamTally,
    TopicStats, TopicSummary,
};
use crate::models::dto::status::{CompletionStatus, PerformanceBand, ScoreLabel, Trend};

/// One row of a student's drill-down.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicReport {
    pub topic: String,
    pub correct: u32,
    pub incorrect: u32,
    pub mastery_percentage: f64,
    pub current_level: Option<Level>,
    pub status: CompletionStatus,
    pub band: PerformanceBand,
    pub feedback_message: Option<String>,
    pub next_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_feedback: Option<Feedback>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamOutcome {
    #[serde(flatten)]
    pub exam: ExamResult,
    pub label: ScoreLabel,
    pub message: String,
    pub review: ExamReview,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSummary {
    pub exams_taken: usize,
    pub average_score: f64,
    pub best_score: f64,
    pub exams_passed: usize,
    pub trend: Trend,
    pub label: ScoreLabel,
    pub topic_tallies: Vec<TopicExamTally>,
    /// Newest first.
    pub exams: Vec<ExamOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentReport {
    pub student_id: String,
    pub student_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub filter: TopicFilter,
    pub topics: Vec<TopicReport>,
    pub topic_summary: TopicSummary,
    pub exam_summary: ExamSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassReport {
    pub filter: TopicFilter,
    pub total_students: usize,
    pub topic_stats: TopicStats,
    pub exam_stats: ExamStats,
    pub score_distribution: Vec<BucketCount>,
    pub topic_exam_averages: Vec<TopicExamAverage>,
    pub mastery_leaderboard: Vec<LeaderboardEntry>,
    pub exam_leaderboard: Vec<LeaderboardEntry>,
    pub recent_activity: Vec<ActivityItem>,
}

/// What the report binary prints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Report {
    Class(ClassReport),
    Student(StudentReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exam_outcome_flattens_the_exam() {
        let outcome = ExamOutcome {
            exam: ExamResult::new(&["Algebra"], 72.0, None),
            label: ScoreLabel::Good,
            message: "Good job".to_string(),
            review: ExamReview::NotRecorded,
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["score"], 72.0);
        assert_eq!(json["topics"][0], "Algebra");
        assert_eq!(json["label"], "Good");
        assert_eq!(json["review"]["state"], "notRecorded");
    }
}
