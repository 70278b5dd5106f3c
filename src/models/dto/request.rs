use serde::{Deserialize, Serialize, Serializer};
use validator::Validate;

use crate::models::domain::{ExamResult, QuizAttempt};

/// What the report binary (or any other caller) asks the analytics service for.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReportRequest {
    /// Restrict every statistic to one topic; `None` means all topics.
    #[validate(length(min = 1, max = 100))]
    pub topic: Option<String>,

    /// Produce a single student's drill-down instead of the class view.
    #[validate(length(min = 1, max = 128))]
    pub student_id: Option<String>,
}

impl ReportRequest {
    pub fn topic_filter(&self) -> TopicFilter {
        match self.topic.as_deref() {
            None | Some("all") => TopicFilter::All,
            Some(topic) => TopicFilter::Topic(topic.to_string()),
        }
    }
}

/// The dashboard's topic selector: either every topic or exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TopicFilter {
    #[default]
    All,
    Topic(String),
}

impl TopicFilter {
    pub fn topic(name: &str) -> Self {
        TopicFilter::Topic(name.to_string())
    }

    pub fn label(&self) -> &str {
        match self {
            TopicFilter::All => "all",
            TopicFilter::Topic(name) => name,
        }
    }

    pub fn matches_attempt(&self, attempt: &QuizAttempt) -> bool {
        match self {
            TopicFilter::All => true,
            TopicFilter::Topic(name) => attempt.topic == *name,
        }
    }

    pub fn matches_exam(&self, exam: &ExamResult) -> bool {
        match self {
            TopicFilter::All => true,
            TopicFilter::Topic(name) => exam.covers(name),
        }
    }
}

impl Serialize for TopicFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_topic_fails_validation() {
        let request = ReportRequest {
            topic: Some(String::new()),
            student_id: None,
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn default_request_is_valid_and_unfiltered() {
        let request = ReportRequest::default();

        assert!(request.validate().is_ok());
        assert_eq!(request.topic_filter(), TopicFilter::All);
    }

    #[test]
    fn all_keyword_means_no_filter() {
        let request = ReportRequest {
            topic: Some("all".to_string()),
            student_id: None,
        };

        assert_eq!(request.topic_filter(), TopicFilter::All);
    }

    #[test]
    fn topic_filter_matches_exam_topics() {
        let filter = TopicFilter::topic("Algebra");
        let exam = ExamResult::new(&["Geometry", "Algebra"], 70.0, None);
        let other = ExamResult::new(&["Geometry"], 70.0, None);

        assert!(filter.matches_exam(&exam));
        assert!(!filter.matches_exam(&other));
        assert!(TopicFilter::All.matches_exam(&other));
    }
}
