use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::messages::ANONYMOUS_STUDENT;
use crate::models::domain::{ExamResult, Feedback, QuizAttempt, TopicMastery};
use crate::models::lenient;

/// A `users/{uid}` document. Only the fields analytics reads are kept.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", deserialize_with = "lenient::identifier")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient::map")]
    pub topics_mastery: BTreeMap<String, TopicMastery>,
}

impl UserProfile {
    pub fn is_student(&self) -> bool {
        self.role.as_deref() == Some("student")
    }
}

/// A student together with every record analytics reads for them.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub topics_mastery: BTreeMap<String, TopicMastery>,
    pub exam_results: Vec<ExamResult>,
    pub quiz_attempts: Vec<QuizAttempt>,
    pub feedback: Vec<Feedback>,
}

impl Student {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => ANONYMOUS_STUDENT,
        }
    }

    pub fn topic(&self, topic: &str) -> Option<&TopicMastery> {
        self.topics_mastery.get(topic)
    }

    pub fn with_topic(mut self, topic: &str, mastery: TopicMastery) -> Self {
        self.topics_mastery.insert(topic.to_string(), mastery);
        self
    }

    pub fn with_exam_results(mut self, exams: Vec<ExamResult>) -> Self {
        self.exam_results = exams;
        self
    }

    pub fn with_quiz_attempts(mut self, attempts: Vec<QuizAttempt>) -> Self {
        self.quiz_attempts = attempts;
        self
    }

    pub fn with_feedback(mut self, feedback: Vec<Feedback>) -> Self {
        self.feedback = feedback;
        self
    }
}

impl From<UserProfile> for Student {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            topics_mastery: profile.topics_mastery,
            ..Self::default()
        }
    }
}
