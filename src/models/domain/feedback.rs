use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::messages::DEFAULT_TEACHER_NAME;
use crate::models::domain::timestamp;
use crate::models::lenient;

/// A teacher's note on a student's progress in one topic.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub topic: String,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub rating: u32,
    #[serde(default, deserialize_with = "lenient::string")]
    pub feedback: String,
    #[serde(default, deserialize_with = "timestamp::instant")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Feedback {
    pub fn has_valid_rating(&self) -> bool {
        (1..=5).contains(&self.rating)
    }

    pub fn teacher_display_name(&self) -> &str {
        match self.teacher_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_TEACHER_NAME,
        }
    }
}
