use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::Level;

/// One row of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub student_id: String,
    pub student_name: String,
    /// `None` when the stored timestamp could not be read; such rows sort last.
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub detail: ActivityDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActivityDetail {
    #[serde(rename_all = "camelCase")]
    QuizAttempt {
        topic: String,
        difficulty: Option<Level>,
        is_correct: bool,
        confidence: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    ExamResult { topics: Vec<String>, score: f64 },
}

impl ActivityItem {
    pub fn is_quiz_attempt(&self) -> bool {
        matches!(self.detail, ActivityDetail::QuizAttempt { .. })
    }

    pub fn is_exam_result(&self) -> bool {
        matches!(self.detail, ActivityDetail::ExamResult { .. })
    }
}
