// Shown on the results page under a topic's mastery bar.
pub const TOPIC_OUTSTANDING: &str =
    "Outstanding mastery! You've demonstrated exceptional understanding of this topic.";
pub const TOPIC_EXCELLENT: &str = "Excellent progress! You have a strong grasp of this material.";
pub const TOPIC_GOOD: &str =
    "Good job! You're showing solid understanding but there's room to improve.";
pub const TOPIC_PROGRESSING: &str =
    "You're making progress, but more practice is needed to master this topic.";
pub const TOPIC_NEEDS_ATTENTION: &str =
    "This topic needs more attention. Consider reviewing the fundamentals and practicing more.";

// Shown under each exam result.
pub const EXAM_OUTSTANDING: &str = "Outstanding performance! You've demonstrated exceptional understanding across all tested topics.";
pub const EXAM_EXCELLENT: &str =
    "Excellent work! You have a strong grasp of the material with only minor gaps.";
pub const EXAM_GOOD: &str = "Good job! Your understanding is solid, though there are some areas that could use improvement.";
pub const EXAM_PASSED: &str = "You've passed, but there are significant knowledge gaps to address. Review the topics you struggled with.";
pub const EXAM_NEEDS_STUDY: &str = "You need additional study and practice. Focus on understanding the core concepts before moving forward.";

pub const ANONYMOUS_STUDENT: &str = "Anonymous Student";
pub const DEFAULT_TEACHER_NAME: &str = "Teacher";
