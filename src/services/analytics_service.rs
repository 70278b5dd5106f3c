use std::sync::Arc;

use futures::future::try_join_all;
use validator::Validate;

use crate::{
    constants::MasteryThresholds,
    errors::{AppError, AppResult},
    models::{
        domain::{ExamResult, Feedback, Student, TopicMastery, UserProfile},
        dto::{
            request::{ReportRequest, TopicFilter},
            response::{ClassReport, ExamOutcome, ExamSummary, Report, StudentReport, TopicReport},
            stats::ScoreBucket,
            status::StatusView,
        },
    },
    repositories::{
        ExamResultRepository, FeedbackRepository, QuizAttemptRepository, StudentRepository,
    },
    services::{
        activity_service::ActivityService, exam_stats_service::ExamStatsService,
        feedback_service::FeedbackService, mastery_service::round_to_tenth,
        mastery_service::MasteryService, rollup_service::RollupService,
        status_service::StatusService,
    },
};

/// Reads a snapshot of the class from the store and turns it into the
/// teacher dashboard reports.
pub struct AnalyticsService {
    students: Arc<dyn StudentRepository>,
    quiz_attempts: Arc<dyn QuizAttemptRepository>,
    exam_results: Arc<dyn ExamResultRepository>,
    feedback: Arc<dyn FeedbackRepository>,
}

impl AnalyticsService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        quiz_attempts: Arc<dyn QuizAttemptRepository>,
        exam_results: Arc<dyn ExamResultRepository>,
        feedback: Arc<dyn FeedbackRepository>,
    ) -> Self {
        Self {
            students,
            quiz_attempts,
            exam_results,
            feedback,
        }
    }

    /// Class report when the request names no student, drill-down otherwise.
    pub async fn report(&self, request: &ReportRequest) -> AppResult<Report> {
        if request.student_id.is_some() {
            Ok(Report::Student(self.student_report(request).await?))
        } else {
            Ok(Report::Class(self.class_report(request).await?))
        }
    }

    pub async fn class_report(&self, request: &ReportRequest) -> AppResult<ClassReport> {
        request.validate()?;
        let students = self.load_class().await?;
        Ok(Self::build_class_report(&students, &request.topic_filter()))
    }

    pub async fn student_report(&self, request: &ReportRequest) -> AppResult<StudentReport> {
        request.validate()?;
        let id = request.student_id.as_deref().ok_or_else(|| {
            AppError::ValidationError("A student id is required for a student report".to_string())
        })?;

        let student = self.load_student_by_id(id).await?;
        Ok(Self::build_student_report(
            &student,
            &request.topic_filter(),
            &MasteryThresholds::default(),
        ))
    }

    /// Every student with their attempts, exams and feedback. Per-student
    /// reads run concurrently.
    pub async fn load_class(&self) -> AppResult<Vec<Student>> {
        let profiles = self.students.find_students().await?;
        log::info!("Gathering analytics snapshot for {} students", profiles.len());

        try_join_all(profiles.into_iter().map(|profile| self.load_student(profile))).await
    }

    pub async fn load_student_by_id(&self, id: &str) -> AppResult<Student> {
        let profile = self
            .students
            .find_student_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student with id '{}' not found", id)))?;

        log::info!("Gathering analytics snapshot for student '{}'", id);
        self.load_student(profile).await
    }

    async fn load_student(&self, profile: UserProfile) -> AppResult<Student> {
        let (attempts, exams, feedback) = futures::try_join!(
            self.quiz_attempts.find_by_user(&profile.id),
            self.exam_results.find_by_user(&profile.id),
            self.feedback.find_by_user(&profile.id),
        )?;

        Ok(Student::from(profile)
            .with_quiz_attempts(attempts)
            .with_exam_results(exams)
            .with_feedback(feedback))
    }

    pub fn build_class_report(students: &[Student], filter: &TopicFilter) -> ClassReport {
        ClassReport {
            filter: filter.clone(),
            total_students: students.len(),
            topic_stats: RollupService::topic_stats(students, filter),
            exam_stats: RollupService::exam_stats(students, filter),
            score_distribution: RollupService::score_distribution(
                students,
                filter,
                &ScoreBucket::standard(),
            ),
            topic_exam_averages: RollupService::topic_exam_averages(students),
            mastery_leaderboard: RollupService::mastery_leaderboard(students, filter),
            exam_leaderboard: RollupService::exam_leaderboard(students, filter),
            recent_activity: ActivityService::recent_activity(students, filter),
        }
    }

    /// With a topic filter the drill-down shows that topic alone, including
    /// a "Not Started" row when the student never practised it.
    pub fn build_student_report(
        student: &Student,
        filter: &TopicFilter,
        thresholds: &MasteryThresholds,
    ) -> StudentReport {
        let topics = match filter {
            TopicFilter::All => student
                .topics_mastery
                .iter()
                .map(|(name, topic)| {
                    Self::topic_report(name, Some(topic), &student.feedback, thresholds)
                })
                .collect(),
            TopicFilter::Topic(name) => vec![Self::topic_report(
                name,
                student.topic(name),
                &student.feedback,
                thresholds,
            )],
        };

        let exams: Vec<ExamResult> = student
            .exam_results
            .iter()
            .filter(|e| filter.matches_exam(e))
            .cloned()
            .collect();

        StudentReport {
            student_id: student.id.clone(),
            student_name: student.display_name().to_string(),
            email: student.email.clone(),
            filter: filter.clone(),
            topics,
            topic_summary: MasteryService::topic_summary(&student.topics_mastery, thresholds),
            exam_summary: Self::exam_summary(&exams),
        }
    }

    fn topic_report(
        name: &str,
        topic: Option<&TopicMastery>,
        feedback: &[Feedback],
        thresholds: &MasteryThresholds,
    ) -> TopicReport {
        let counts = MasteryService::extract_quiz_data(topic);
        let percentage = MasteryService::mastery_percentage(topic);
        let level = topic.and_then(|t| t.current_level.as_ref());

        TopicReport {
            topic: name.to_string(),
            correct: counts.correct,
            incorrect: counts.incorrect,
            mastery_percentage: percentage,
            current_level: level.cloned(),
            status: StatusService::classify(topic, StatusView::Teacher, thresholds),
            band: StatusService::performance_band(percentage),
            feedback_message: StatusService::topic_feedback_message(topic).map(str::to_string),
            next_level: StatusService::next_level_hint(level).to_string(),
            latest_feedback: FeedbackService::latest_for_topic(feedback, name).cloned(),
        }
    }

    fn exam_summary(exams: &[ExamResult]) -> ExamSummary {
        let average = ExamStatsService::exam_average(exams);

        let mut newest_first = exams.to_vec();
        newest_first.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        ExamSummary {
            exams_taken: exams.len(),
            average_score: round_to_tenth(average),
            best_score: ExamStatsService::best_score(exams),
            exams_passed: ExamStatsService::exams_passed(exams),
            trend: ExamStatsService::recent_trend(exams),
            label: ExamStatsService::score_label(average),
            topic_tallies: ExamStatsService::topic_tallies(exams),
            exams: newest_first
                .into_iter()
                .map(|exam| ExamOutcome {
                    label: ExamStatsService::score_label(exam.score),
                    message: ExamStatsService::exam_feedback_message(exam.score).to_string(),
                    review: ExamStatsService::review(&exam),
                    exam,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Level;
    use crate::models::dto::status::{CompletionStatus, Trend};
    use crate::repositories::{
        exam_result_repository::MockExamResultRepository,
        feedback_repository::MockFeedbackRepository,
        quiz_attempt_repository::MockQuizAttemptRepository,
        student_repository::MockStudentRepository,
    };
    use crate::test_utils::fixtures;

    fn service(
        students: MockStudentRepository,
        attempts: MockQuizAttemptRepository,
        exams: MockExamResultRepository,
        feedback: MockFeedbackRepository,
    ) -> AnalyticsService {
        AnalyticsService::new(
            Arc::new(students),
            Arc::new(attempts),
            Arc::new(exams),
            Arc::new(feedback),
        )
    }

    fn empty_reads() -> (
        MockQuizAttemptRepository,
        MockExamResultRepository,
        MockFeedbackRepository,
    ) {
        let mut attempts = MockQuizAttemptRepository::new();
        attempts.expect_find_by_user().returning(|_| Ok(vec![]));
        let mut exams = MockExamResultRepository::new();
        exams.expect_find_by_user().returning(|_| Ok(vec![]));
        let mut feedback = MockFeedbackRepository::new();
        feedback.expect_find_by_user().returning(|_| Ok(vec![]));
        (attempts, exams, feedback)
    }

    #[tokio::test]
    async fn unknown_student_is_not_found() {
        let mut students = MockStudentRepository::new();
        students
            .expect_find_student_by_id()
            .times(1)
            .returning(|_| Ok(None));
        let (attempts, exams, feedback) = empty_reads();

        let request = ReportRequest {
            topic: None,
            student_id: Some("ghost".to_string()),
        };
        let result = service(students, attempts, exams, feedback)
            .student_report(&request)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn invalid_request_is_rejected_before_any_read() {
        let request = ReportRequest {
            topic: Some(String::new()),
            student_id: None,
        };

        let result = service(
            MockStudentRepository::new(),
            MockQuizAttemptRepository::new(),
            MockExamResultRepository::new(),
            MockFeedbackRepository::new(),
        )
        .class_report(&request)
        .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn store_failures_surface_as_database_errors() {
        let mut students = MockStudentRepository::new();
        students
            .expect_find_students()
            .returning(|| Ok(vec![fixtures::profile("s1", "Dana")]));
        let (_, exams, feedback) = empty_reads();
        let mut attempts = MockQuizAttemptRepository::new();
        attempts
            .expect_find_by_user()
            .returning(|_| Err(AppError::DatabaseError("connection reset".to_string())));

        let result = service(students, attempts, exams, feedback)
            .class_report(&ReportRequest::default())
            .await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn stored_student_is_reported_with_dashboard_thresholds() {
        let mut students = MockStudentRepository::new();
        students
            .expect_find_student_by_id()
            .times(1)
            .returning(|_| {
                Ok(Some(fixtures::profile_with_topics(
                    "s1",
                    "Dana",
                    &[("Algebra", 3, 1, Level::Hard), ("Sets", 8, 0, Level::Medium)],
                )))
            });
        let (attempts, exams, feedback) = empty_reads();

        let request = ReportRequest {
            topic: None,
            student_id: Some("s1".to_string()),
        };
        let report = service(students, attempts, exams, feedback)
            .student_report(&request)
            .await
            .unwrap();

        assert_eq!(report.student_name, "Dana");
        assert_eq!(report.topics[0].status, CompletionStatus::Mastered);
        assert_eq!(report.topics[1].status, CompletionStatus::IntermediateExcelling);
        assert_eq!(report.topic_summary.mastered_topics, 1);
    }

    #[tokio::test]
    async fn report_dispatches_on_student_id() {
        let mut students = MockStudentRepository::new();
        students.expect_find_students().returning(|| Ok(vec![]));
        let (attempts, exams, feedback) = empty_reads();

        let report = service(students, attempts, exams, feedback)
            .report(&ReportRequest::default())
            .await
            .unwrap();

        match report {
            Report::Class(class) => {
                assert_eq!(class.total_students, 0);
                assert_eq!(class.topic_stats.average_score, "0.0");
            }
            Report::Student(_) => panic!("expected a class report"),
        }
    }

    #[test]
    fn student_report_uses_teacher_status() {
        let student = Student::new("s1")
            .with_topic("Algebra", TopicMastery::new(3, 1, Some(Level::Hard)))
            .with_topic("Sets", TopicMastery::new(7, 3, Some(Level::Medium)));

        let report = AnalyticsService::build_student_report(
            &student,
            &TopicFilter::All,
            &MasteryThresholds::default(),
        );

        assert_eq!(report.topics.len(), 2);
        assert_eq!(report.topics[0].status, CompletionStatus::Mastered);
        assert_eq!(report.topics[1].status, CompletionStatus::Intermediate);
        assert_eq!(report.topics[1].mastery_percentage, 70.0);
        assert_eq!(report.topic_summary.mastered_topics, 1);
    }

    #[test]
    fn filtered_student_report_shows_untouched_topic_as_not_started() {
        let student = Student::new("s1")
            .with_topic("Algebra", TopicMastery::new(3, 1, Some(Level::Hard)))
            .with_exam_results(vec![
                ExamResult::new(&["Algebra"], 90.0, None),
                ExamResult::new(&["Geometry"], 40.0, None),
            ]);

        let report = AnalyticsService::build_student_report(
            &student,
            &TopicFilter::topic("Geometry"),
            &MasteryThresholds::default(),
        );

        assert_eq!(report.topics.len(), 1);
        assert_eq!(report.topics[0].status, CompletionStatus::NotStarted);
        assert_eq!(report.topics[0].feedback_message, None);
        assert_eq!(report.exam_summary.exams_taken, 1);
        assert_eq!(report.exam_summary.average_score, 40.0);
        assert_eq!(report.exam_summary.trend, Trend::InsufficientData);
    }
}
