use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::level::{optional_level, Level};
use crate::models::domain::timestamp;
use crate::models::lenient;

/// Practice-quiz answer counters for one topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCounts {
    #[serde(default, deserialize_with = "lenient::count")]
    pub correct: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub incorrect: u32,
}

impl QuizCounts {
    pub fn new(correct: u32, incorrect: u32) -> Self {
        Self { correct, incorrect }
    }

    pub fn total(&self) -> u32 {
        self.correct.saturating_add(self.incorrect)
    }
}

/// A `topicsMastery` entry exactly as the client writes it. Current records
/// nest the counters under `topicQuiz`; legacy records keep them flat.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTopicMastery {
    #[serde(default, deserialize_with = "lenient::optional_object")]
    pub topic_quiz: Option<StoredTopicQuiz>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub correct: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub incorrect: u32,
    #[serde(default, deserialize_with = "optional_level")]
    pub current_level: Option<Level>,
    #[serde(default, deserialize_with = "timestamp::instant")]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTopicQuiz {
    #[serde(default, deserialize_with = "lenient::count")]
    pub correct: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub incorrect: u32,
    #[serde(default, deserialize_with = "timestamp::instant")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Canonical per-topic progress. Every stored shape is normalized into this
/// once, on the way in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredTopicMastery")]
pub struct TopicMastery {
    pub topic_quiz: TopicQuiz,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_level: Option<Level>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicQuiz {
    pub correct: u32,
    pub incorrect: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl TopicMastery {
    pub fn new(correct: u32, incorrect: u32, current_level: Option<Level>) -> Self {
        Self {
            topic_quiz: TopicQuiz {
                correct,
                incorrect,
                last_updated: None,
            },
            current_level,
        }
    }

    /// Collapses either stored shape into the canonical one. The nested
    /// `topicQuiz` counters win whenever that object is present.
    pub fn normalize(raw: StoredTopicMastery) -> Self {
        let topic_quiz = match raw.topic_quiz {
            Some(nested) => TopicQuiz {
                correct: nested.correct,
                incorrect: nested.incorrect,
                last_updated: nested.last_updated.or(raw.last_updated),
            },
            None => TopicQuiz {
                correct: raw.correct,
                incorrect: raw.incorrect,
                last_updated: raw.last_updated,
            },
        };

        Self {
            topic_quiz,
            current_level: raw.current_level,
        }
    }

    pub fn counts(&self) -> QuizCounts {
        QuizCounts::new(self.topic_quiz.correct, self.topic_quiz.incorrect)
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.current_level = Some(level);
        self
    }
}

impl From<StoredTopicMastery> for TopicMastery {
    fn from(raw: StoredTopicMastery) -> Self {
        TopicMastery::normalize(raw)
    }
}
