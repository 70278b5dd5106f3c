pub mod exam_result;
pub mod feedback;
pub mod level;
pub mod quiz_attempt;
pub mod student;
pub mod timestamp;
pub mod topic_mastery;

pub use exam_result::{ExamQuestion, ExamResult};
pub use feedback::Feedback;
pub use level::Level;
pub use quiz_attempt::{QuizAttempt, QuizType};
pub use student::{Student, UserProfile};
pub use topic_mastery::{QuizCounts, StoredTopicMastery, TopicMastery};
