pub mod activity_service;
pub mod analytics_service;
pub mod exam_stats_service;
pub mod feedback_service;
pub mod mastery_service;
pub mod rollup_service;
pub mod status_service;

pub use activity_service::ActivityService;
pub use analytics_service::AnalyticsService;
pub use exam_stats_service::ExamStatsService;
pub use feedback_service::FeedbackService;
pub use mastery_service::MasteryService;
pub use rollup_service::RollupService;
pub use status_service::StatusService;
