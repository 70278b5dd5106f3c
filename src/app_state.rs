use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoExamResultRepository, MongoFeedbackRepository, MongoQuizAttemptRepository,
        MongoStudentRepository,
    },
    services::AnalyticsService,
};

#[derive(Clone)]
pub struct AppState {
    pub analytics_service: Arc<AnalyticsService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        config.validate()?;
        let db = Database::connect(&config).await?;

        let analytics_service = Arc::new(AnalyticsService::new(
            Arc::new(MongoStudentRepository::new(&db, &config)),
            Arc::new(MongoQuizAttemptRepository::new(&db, &config)),
            Arc::new(MongoExamResultRepository::new(&db, &config)),
            Arc::new(MongoFeedbackRepository::new(&db, &config)),
        ));

        Ok(Self {
            analytics_service,
            config: Arc::new(config),
        })
    }
}
