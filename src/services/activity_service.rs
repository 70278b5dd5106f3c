use crate::constants::thresholds::RECENT_ACTIVITY_LIMIT;
use crate::models::domain::{ExamResult, QuizAttempt, Student};
use crate::models::dto::activity::{ActivityDetail, ActivityItem};
use crate::models::dto::request::TopicFilter;

pub struct ActivityService;

impl ActivityService {
    /// The class-wide "recent activity" feed: practice answers and exams of
    /// every student, newest first, at most ten rows.
    pub fn recent_activity(students: &[Student], filter: &TopicFilter) -> Vec<ActivityItem> {
        let mut items = Vec::new();
        for student in students {
            items.extend(
                student
                    .quiz_attempts
                    .iter()
                    .filter(|a| a.is_practice() && filter.matches_attempt(a))
                    .map(|a| Self::from_attempt(student, a)),
            );
            items.extend(
                student
                    .exam_results
                    .iter()
                    .filter(|e| filter.matches_exam(e))
                    .map(|e| Self::from_exam(student, e)),
            );
        }
        Self::sort_and_truncate(items)
    }

    /// Newest first; rows without a readable timestamp go last. Equal
    /// timestamps keep their relative order, so applying this twice changes
    /// nothing.
    pub fn sort_and_truncate(mut items: Vec<ActivityItem>) -> Vec<ActivityItem> {
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        items.truncate(RECENT_ACTIVITY_LIMIT);
        items
    }

    fn from_attempt(student: &Student, attempt: &QuizAttempt) -> ActivityItem {
        ActivityItem {
            student_id: student.id.clone(),
            student_name: student.display_name().to_string(),
            timestamp: attempt.timestamp,
            detail: ActivityDetail::QuizAttempt {
                topic: attempt.topic.clone(),
                difficulty: attempt.difficulty.clone(),
                is_correct: attempt.is_correct,
                confidence: attempt.confidence,
            },
        }
    }

    fn from_exam(student: &Student, exam: &ExamResult) -> ActivityItem {
        ActivityItem {
            student_id: student.id.clone(),
            student_name: student.display_name().to_string(),
            timestamp: exam.timestamp,
            detail: ActivityDetail::ExamResult {
                topics: exam.topics.clone(),
                score: exam.score,
            },
        }
    }
}
