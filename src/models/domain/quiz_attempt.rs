use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::domain::level::{optional_level, Level};
use crate::models::domain::timestamp;
use crate::models::lenient;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizType {
    #[default]
    Topic,
    Exam,
}

impl<'de> Deserialize<'de> for QuizType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Older attempts were written without a type and are practice answers.
        Ok(match lenient::text(deserializer)?.as_deref() {
            Some("exam") => QuizType::Exam,
            _ => QuizType::Topic,
        })
    }
}

/// One answered question, recorded right after the scoring API responds.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub topic: String,
    #[serde(default, deserialize_with = "optional_level")]
    pub difficulty: Option<Level>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_correct: bool,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default)]
    pub quiz_type: QuizType,
    #[serde(default, deserialize_with = "timestamp::instant")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl QuizAttempt {
    pub fn practice(topic: &str, difficulty: Level, is_correct: bool, at: DateTime<Utc>) -> Self {
        Self {
            user_id: None,
            question_id: None,
            topic: topic.to_string(),
            difficulty: Some(difficulty),
            is_correct,
            confidence: None,
            feedback: None,
            quiz_type: QuizType::Topic,
            timestamp: Some(at),
        }
    }

    pub fn is_practice(&self) -> bool {
        self.quiz_type == QuizType::Topic
    }
}
