use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::timestamp;
use crate::models::lenient;

/// Summary of one completed exam.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub topics: Vec<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub score: f64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_questions: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub correct: u32,
    #[serde(default, deserialize_with = "timestamp::instant")]
    pub timestamp: Option<DateTime<Utc>>,
    /// `None` for exams taken before per-question tracking existed.
    #[serde(
        default,
        deserialize_with = "lenient::optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub questions: Option<Vec<ExamQuestion>>,
}

/// Per-question review record stored with newer exams.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamQuestion {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_flag", skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ExamResult {
    pub fn new(topics: &[&str], score: f64, timestamp: Option<DateTime<Utc>>) -> Self {
        Self {
            topics: topics.iter().map(|t| t.to_string()).collect(),
            score,
            timestamp,
            ..Self::default()
        }
    }

    pub fn covers(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }

    pub fn incorrect(&self) -> u32 {
        self.total_questions.saturating_sub(self.correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stored_exam_deserializes() {
        let exam: ExamResult = serde_json::from_value(json!({
            "userId": "u1",
            "topics": ["Algebra", "Geometry"],
            "score": 85.0,
            "totalQuestions": 20,
            "correct": 17,
            "timestamp": "2024-05-02T12:00:00Z",
            "questions": [
                { "question": "2+2", "userAnswer": "5", "correctAnswer": "4", "isCorrect": false }
            ]
        }))
        .unwrap();

        assert!(exam.covers("Geometry"));
        assert!(!exam.covers("Sets"));
        assert_eq!(exam.incorrect(), 3);
        assert_eq!(exam.questions.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn legacy_exam_without_questions_has_none() {
        let exam: ExamResult =
            serde_json::from_value(json!({ "topics": "Algebra", "score": "n/a" })).unwrap();

        assert!(exam.topics.is_empty());
        assert_eq!(exam.score, 0.0);
        assert!(exam.questions.is_none());
    }

    #[test]
    fn correct_above_total_does_not_underflow() {
        let exam: ExamResult =
            serde_json::from_value(json!({ "totalQuestions": 3, "correct": 5 })).unwrap();

        assert_eq!(exam.incorrect(), 0);
    }
}
