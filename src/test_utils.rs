use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::domain::{ExamResult, Feedback, Level, QuizAttempt, TopicMastery, UserProfile};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A fixed instant so ordering assertions never depend on the clock.
    pub fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap() + Duration::days(n)
    }

    pub fn profile(id: &str, name: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            name: Some(name.to_string()),
            email: Some(format!("{}@example.com", id)),
            role: Some("student".to_string()),
            ..UserProfile::default()
        }
    }

    /// A profile with one topic record per `(name, correct, incorrect, level)`.
    pub fn profile_with_topics(
        id: &str,
        name: &str,
        topics: &[(&str, u32, u32, Level)],
    ) -> UserProfile {
        let mut profile = profile(id, name);
        for (topic, correct, incorrect, level) in topics {
            profile.topics_mastery.insert(
                topic.to_string(),
                TopicMastery::new(*correct, *incorrect, Some(level.clone())),
            );
        }
        profile
    }

    pub fn exam(user_id: &str, topics: &[&str], score: f64, on: i64) -> ExamResult {
        let mut exam = ExamResult::new(topics, score, Some(day(on)));
        exam.user_id = Some(user_id.to_string());
        exam
    }

    pub fn attempt(user_id: &str, topic: &str, is_correct: bool, on: i64) -> QuizAttempt {
        let mut attempt = QuizAttempt::practice(topic, Level::Easy, is_correct, day(on));
        attempt.user_id = Some(user_id.to_string());
        attempt
    }

    pub fn feedback(user_id: &str, topic: &str, text: &str, on: i64) -> Feedback {
        Feedback {
            user_id: Some(user_id.to_string()),
            topic: topic.to_string(),
            teacher_id: Some("t1".to_string()),
            teacher_name: Some("Ms. Rivera".to_string()),
            rating: 4,
            feedback: text.to_string(),
            timestamp: Some(day(on)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::Level;

    #[test]
    fn profile_is_a_student() {
        let profile = profile("s1", "Dana");
        assert!(profile.is_student());
        assert_eq!(profile.email.as_deref(), Some("s1@example.com"));
    }

    #[test]
    fn profile_with_topics_builds_records() {
        let profile = profile_with_topics("s1", "Dana", &[("Algebra", 7, 3, Level::Medium)]);
        assert_eq!(profile.topics_mastery["Algebra"].counts().total(), 10);
    }

    #[test]
    fn days_are_ordered() {
        assert!(day(2) > day(1));
        assert_eq!(exam("s1", &["Sets"], 80.0, 3).timestamp, Some(day(3)));
        assert!(attempt("s1", "Sets", true, 1).is_practice());
        assert_eq!(feedback("s1", "Sets", "Nice", 2).teacher_display_name(), "Ms. Rivera");
    }
}
