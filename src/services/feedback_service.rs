use std::collections::BTreeMap;

use crate::models::domain::Feedback;

pub struct FeedbackService;

impl FeedbackService {
    /// Teacher notes per topic, newest first. Notes whose timestamp cannot
    /// be read sort after every dated note.
    pub fn group_by_topic(feedback: &[Feedback]) -> BTreeMap<String, Vec<Feedback>> {
        let mut grouped: BTreeMap<String, Vec<Feedback>> = BTreeMap::new();
        for entry in feedback {
            grouped.entry(entry.topic.clone()).or_default().push(entry.clone());
        }
        for entries in grouped.values_mut() {
            entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        }
        grouped
    }

    pub fn latest_for_topic<'a>(feedback: &'a [Feedback], topic: &str) -> Option<&'a Feedback> {
        feedback
            .iter()
            .filter(|f| f.topic == topic)
            .reduce(|best, f| if f.timestamp > best.timestamp { f } else { best })
    }
}
