pub mod exam_result_repository;
pub mod feedback_repository;
pub mod quiz_attempt_repository;
pub mod student_repository;

pub use exam_result_repository::{ExamResultRepository, MongoExamResultRepository};
pub use feedback_repository::{FeedbackRepository, MongoFeedbackRepository};
pub use quiz_attempt_repository::{MongoQuizAttemptRepository, QuizAttemptRepository};
pub use student_repository::{MongoStudentRepository, StudentRepository};
