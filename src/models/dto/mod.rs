pub mod activity;
pub mod request;
pub mod response;
pub mod stats;
pub mod status;

pub use activity::{ActivityDetail, ActivityItem};
pub use request::{ReportRequest, TopicFilter};
pub use response::{ClassReport, ExamOutcome, ExamSummary, Report, StudentReport, TopicReport};
pub use status::{CompletionStatus, PerformanceBand, ScoreLabel, StatusView, Trend};
