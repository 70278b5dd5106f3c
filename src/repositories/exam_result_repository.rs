use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{config::Config, db::Database, errors::AppResult, models::domain::ExamResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExamResultRepository: Send + Sync {
    /// The user's exams, newest first.
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<ExamResult>>;
}

pub struct MongoExamResultRepository {
    collection: Collection<ExamResult>,
}

impl MongoExamResultRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        let collection = db.collection(&config.exam_results_collection);
        Self { collection }
    }
}

#[async_trait]
impl ExamResultRepository for MongoExamResultRepository {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<ExamResult>> {
        let exams: Vec<ExamResult> = self
            .collection
            .find(doc! { "userId": user_id })
            .sort(doc! { "timestamp": -1 })
            .await?
            .try_collect()
            .await?;
        log::debug!("Loaded {} exam results for user '{}'", exams.len(), user_id);
        Ok(exams)
    }
}
